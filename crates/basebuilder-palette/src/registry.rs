//! Command handlers and the registry that builds them.

use crate::catalog::{Catalog, CommandEntry, QuoteBook};
use crate::content::{ContentItem, ModalContent};
use crate::palette::CommandOutcome;
use std::collections::HashMap;

/// Name of the built-in random quote command.
pub const QUOTE_COMMAND: &str = "/quote";
/// Name of the built-in command that opens the builder.
pub const BUILDER_COMMAND: &str = "/builder";

/// A palette command.
pub trait Command: Send + Sync {
    /// Slash-prefixed name, e.g. `/about`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn execute(&self) -> CommandOutcome;
}

/// Shows the modal described in the manifest.
pub struct ContentCommand {
    name: String,
    description: String,
    modal: ModalContent,
}

impl ContentCommand {
    pub fn new(entry: &CommandEntry) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            modal: entry.modal(&entry.name),
        }
    }
}

impl Command for ContentCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self) -> CommandOutcome {
        CommandOutcome::ShowModal(self.modal.clone())
    }
}

/// About and credits. Falls back to a placeholder when no content is given.
pub struct AboutCommand {
    name: String,
    description: String,
    modal: ModalContent,
}

impl AboutCommand {
    pub fn new(entry: &CommandEntry) -> Self {
        let mut modal = entry.modal("About");
        if modal.is_empty() {
            modal.items.push(ContentItem::text("No about information available."));
        }
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            modal,
        }
    }
}

impl Command for AboutCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self) -> CommandOutcome {
        CommandOutcome::ShowModal(self.modal.clone())
    }
}

pub struct BuilderCommand {
    name: String,
    description: String,
}

impl BuilderCommand {
    pub fn new(entry: &CommandEntry) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
        }
    }
}

impl Command for BuilderCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self) -> CommandOutcome {
        CommandOutcome::OpenBuilder
    }
}

/// Shows a random quote with its speaker.
pub struct QuoteCommand {
    name: String,
    description: String,
    quotes: QuoteBook,
}

impl QuoteCommand {
    pub fn new(entry: &CommandEntry, quotes: QuoteBook) -> Self {
        Self {
            name: entry.name.clone(),
            description: entry.description.clone(),
            quotes,
        }
    }
}

impl Command for QuoteCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self) -> CommandOutcome {
        match self.quotes.random() {
            Some(quote) => CommandOutcome::ShowModal(ModalContent::new(
                "Random Dune Quote",
                vec![
                    ContentItem::quote(quote.text.clone()),
                    ContentItem::text(format!("\u{2014} {}", quote.speaker)),
                ],
            )),
            None => CommandOutcome::Unknown,
        }
    }
}

/// Builds a command from its manifest entry.
pub type HandlerFn = fn(&CommandEntry, &Catalog) -> Box<dyn Command>;

/// Static map from handler name to constructor.
pub struct CommandRegistry {
    handlers: HashMap<&'static str, HandlerFn>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with the `content`, `about`, `builder` and `quote` handlers.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("content", |entry, _| Box::new(ContentCommand::new(entry)));
        registry.register("about", |entry, _| Box::new(AboutCommand::new(entry)));
        registry.register("builder", |entry, _| Box::new(BuilderCommand::new(entry)));
        registry.register("quote", |entry, catalog| {
            Box::new(QuoteCommand::new(entry, catalog.quotes.clone()))
        });
        registry
    }

    pub fn register(&mut self, handler: &'static str, build: HandlerFn) {
        self.handlers.insert(handler, build);
    }

    pub fn contains(&self, handler: &str) -> bool {
        self.handlers.contains_key(handler)
    }

    /// Instantiate one entry, or `None` if its handler is not registered.
    pub fn instantiate(&self, entry: &CommandEntry, catalog: &Catalog) -> Option<Box<dyn Command>> {
        match self.handlers.get(entry.handler()) {
            Some(build) => Some(build(entry, catalog)),
            None => {
                log::error!(
                    "Failed to initialize command {}: unknown handler '{}'",
                    entry.name,
                    entry.handler()
                );
                None
            }
        }
    }

    /// Build every manifest command plus the built-in `/quote` (when quotes
    /// are loaded) and `/builder` commands. Manifest entries take precedence
    /// over built-ins of the same name.
    pub fn build(&self, catalog: &Catalog) -> Vec<Box<dyn Command>> {
        let mut commands: Vec<Box<dyn Command>> = catalog
            .manifest
            .commands
            .iter()
            .filter_map(|entry| self.instantiate(entry, catalog))
            .collect();

        let mut builtins = Vec::new();
        if !catalog.quotes.is_empty() {
            let mut entry = CommandEntry::new(QUOTE_COMMAND, "Display a random quote from Dune");
            entry.handler = Some("quote".into());
            builtins.push(entry);
        }
        let mut entry = CommandEntry::new(BUILDER_COMMAND, "Dune Awakening base builder");
        entry.handler = Some("builder".into());
        builtins.push(entry);

        for entry in builtins {
            if commands.iter().any(|c| c.name() == entry.name) {
                continue;
            }
            if let Some(command) = self.instantiate(&entry, catalog) {
                commands.push(command);
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Manifest, Quote};
    use serde_json::json;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn names(commands: &[Box<dyn Command>]) -> Vec<&str> {
        commands.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_unknown_handler_skipped() {
        init_logging();
        let mut entry = CommandEntry::new("/weird", "Nope");
        entry.handler = Some("WeirdCommand".into());
        let catalog = Catalog::new(
            Manifest {
                commands: vec![entry, CommandEntry::new("/lore", "Lore")],
            },
            QuoteBook::default(),
        );

        let commands = CommandRegistry::builtin().build(&catalog);
        assert_eq!(names(&commands), vec!["/lore", "/builder"]);
    }

    #[test]
    fn test_quote_builtin_requires_quotes() {
        let mut catalog = Catalog::default();
        assert!(!names(&CommandRegistry::builtin().build(&catalog)).contains(&QUOTE_COMMAND));

        catalog.quotes.quotes.push(Quote {
            text: "Fear is the mind-killer.".into(),
            speaker: "Bene Gesserit".into(),
        });
        let commands = CommandRegistry::builtin().build(&catalog);
        let quote = commands.iter().find(|c| c.name() == QUOTE_COMMAND).unwrap();
        let CommandOutcome::ShowModal(modal) = quote.execute() else {
            panic!("expected a modal");
        };
        assert_eq!(modal.items[0], ContentItem::quote("Fear is the mind-killer."));
        assert_eq!(modal.items[1], ContentItem::text("\u{2014} Bene Gesserit"));
    }

    #[test]
    fn test_manifest_overrides_builtin() {
        let mut entry = CommandEntry::new(BUILDER_COMMAND, "Custom builder");
        entry.content = vec![json!({"type": "text", "text": "soon"})];
        let catalog = Catalog::new(Manifest { commands: vec![entry] }, QuoteBook::default());

        let commands = CommandRegistry::builtin().build(&catalog);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].description(), "Custom builder");
        assert!(matches!(commands[0].execute(), CommandOutcome::ShowModal(_)));
    }

    #[test]
    fn test_about_placeholder() {
        let mut entry = CommandEntry::new("/about", "About");
        entry.handler = Some("about".into());
        let CommandOutcome::ShowModal(modal) = AboutCommand::new(&entry).execute() else {
            panic!("expected a modal");
        };
        assert_eq!(modal.title, "About");
        assert_eq!(modal.items, vec![ContentItem::text("No about information available.")]);
    }

    #[test]
    fn test_custom_handler() {
        let mut registry = CommandRegistry::empty();
        registry.register("builder", |entry, _| Box::new(BuilderCommand::new(entry)));
        assert!(registry.contains("builder"));
        assert!(!registry.contains("content"));

        let entry = CommandEntry::new("/lore", "Lore");
        assert!(registry.instantiate(&entry, &Catalog::default()).is_none());
    }
}
