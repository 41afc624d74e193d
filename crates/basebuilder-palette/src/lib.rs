//! Base Builder command palette
//!
//! Loads a command manifest, matches slash-command input against it and
//! produces the outcome to present: a modal of structured content, a switch
//! to the builder, or nothing.

pub mod catalog;
pub mod content;
pub mod palette;
pub mod registry;

pub use catalog::{Catalog, CommandEntry, Manifest, PaletteError, Quote, QuoteBook};
pub use content::{ContentItem, ModalContent};
pub use palette::{CommandOutcome, CommandPalette};
pub use registry::{Command, CommandRegistry};
