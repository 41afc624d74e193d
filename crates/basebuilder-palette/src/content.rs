//! Structured modal content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Line separator used inside content text.
pub const LINE_SEPARATOR: &str = "/n";

/// One block of modal content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        text: String,
    },
    List {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        items: Vec<String>,
    },
    Infobox {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<String>,
        text: String,
    },
    Quote {
        text: String,
    },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            header: None,
            text: text.into(),
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::Quote { text: text.into() }
    }

    pub fn header(&self) -> Option<&str> {
        match self {
            Self::Text { header, .. } | Self::List { header, .. } | Self::Infobox { header, .. } => {
                header.as_deref()
            }
            Self::Quote { .. } => None,
        }
    }

    /// Parse raw JSON items, skipping any that are malformed or of an
    /// unsupported type.
    pub fn parse_all(values: &[Value]) -> Vec<ContentItem> {
        values
            .iter()
            .filter_map(|value| match serde_json::from_value(value.clone()) {
                Ok(item) => Some(item),
                Err(e) => {
                    let kind = value.get("type").and_then(Value::as_str).unwrap_or("<none>");
                    log::warn!("Skipping content item of type '{}': {}", kind, e);
                    None
                }
            })
            .collect()
    }
}

/// Split content text on the separator, trimming each line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split(LINE_SEPARATOR).map(str::trim).collect()
}

/// A titled modal dialog body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalContent {
    pub title: String,
    pub items: Vec<ContentItem>,
}

impl ModalContent {
    pub fn new(title: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Plain-text rendering: the title, then each item separated by a blank
    /// line.
    pub fn render_text(&self) -> String {
        let mut blocks = vec![self.title.clone()];
        for item in &self.items {
            let mut lines: Vec<String> = Vec::new();
            if let Some(header) = item.header() {
                lines.push(format!("## {}", header));
            }
            match item {
                ContentItem::Text { text, .. } => {
                    lines.extend(split_lines(text).into_iter().map(String::from));
                }
                ContentItem::Infobox { text, .. } => {
                    lines.extend(split_lines(text).into_iter().map(|l| format!("| {}", l)));
                }
                ContentItem::List { items, .. } => {
                    lines.extend(items.iter().map(|i| format!("- {}", i)));
                }
                ContentItem::Quote { text } => {
                    lines.extend(split_lines(text).into_iter().map(|l| format!("> {}", l)));
                }
            }
            blocks.push(lines.join("\n"));
        }
        blocks.join("\n\n")
    }
}
