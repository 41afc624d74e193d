//! Command manifest and quote loading.
//!
//! Loading never fails outward: the `*_or_empty` helpers log the problem and
//! hand back an empty catalog so the palette still works.

use crate::content::{ContentItem, ModalContent};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors from reading palette data files.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid palette data: {0}")]
    Json(#[from] serde_json::Error),
}

/// One command as described by the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Registry key of the handler; `content` when absent.
    #[serde(default)]
    pub handler: Option<String>,
    /// Raw content items, parsed leniently when the command is built.
    #[serde(default)]
    pub content: Vec<Value>,
}

impl CommandEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            title: None,
            handler: None,
            content: Vec::new(),
        }
    }

    pub fn handler(&self) -> &str {
        self.handler.as_deref().unwrap_or("content")
    }

    /// The modal this entry describes. The title falls back to `fallback`.
    pub fn modal(&self, fallback: &str) -> ModalContent {
        ModalContent::new(
            self.title.clone().unwrap_or_else(|| fallback.to_string()),
            ContentItem::parse_all(&self.content),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PaletteError> {
        Self::from_json(&read(path)?)
    }

    pub fn load_or_empty(path: &Path) -> Self {
        Self::load_from_file(path).unwrap_or_else(|e| {
            log::error!("Error loading commands: {}", e);
            Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub speaker: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBook {
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

impl QuoteBook {
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PaletteError> {
        Self::from_json(&read(path)?)
    }

    pub fn load_or_empty(path: &Path) -> Self {
        Self::load_from_file(path).unwrap_or_else(|e| {
            log::error!("Error loading quotes: {}", e);
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn random(&self) -> Option<&Quote> {
        if self.quotes.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.quotes.len());
        self.quotes.get(index)
    }
}

/// Everything the palette is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub manifest: Manifest,
    pub quotes: QuoteBook,
}

impl Catalog {
    pub fn new(manifest: Manifest, quotes: QuoteBook) -> Self {
        Self { manifest, quotes }
    }

    /// Load `info.json` and `quotes.json` from a data directory.
    pub fn load_dir(dir: &Path) -> Self {
        Self::new(
            Manifest::load_or_empty(&dir.join("info.json")),
            QuoteBook::load_or_empty(&dir.join("quotes.json")),
        )
    }
}

fn read(path: &Path) -> Result<String, PaletteError> {
    std::fs::read_to_string(path).map_err(|source| PaletteError::Io {
        path: path.display().to_string(),
        source,
    })
}
