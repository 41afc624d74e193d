//! Slash-command input handling.

use crate::catalog::Catalog;
use crate::content::ModalContent;
use crate::registry::{Command, CommandRegistry};

/// What the host should do after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    ShowModal(ModalContent),
    /// Switch to the base builder.
    OpenBuilder,
    /// No command matched; the host flashes the input as invalid.
    Unknown,
}

/// The loaded command set, sorted by name.
pub struct CommandPalette {
    commands: Vec<Box<dyn Command>>,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CommandPalette {
    pub fn new(mut commands: Vec<Box<dyn Command>>) -> Self {
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        Self { commands }
    }

    pub fn from_catalog(catalog: &Catalog, registry: &CommandRegistry) -> Self {
        let palette = Self::new(registry.build(catalog));
        log::info!("Loaded {} palette commands", palette.len());
        palette
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.commands().find(|c| c.name() == name)
    }

    /// Commands to list for the current input. Blank input lists everything.
    pub fn suggestions(&self, input: &str) -> Vec<&dyn Command> {
        let input = input.trim();
        if input.is_empty() {
            return self.commands().collect();
        }
        let prefix = format!("/{}", input.to_lowercase());
        self.commands().filter(|c| c.name().starts_with(&prefix)).collect()
    }

    /// Run a command by its full name.
    pub fn execute(&self, name: &str) -> CommandOutcome {
        match self.find(name) {
            Some(command) => {
                log::debug!("Executing {}", name);
                command.execute()
            }
            None => CommandOutcome::Unknown,
        }
    }

    /// Run what the user typed (without the leading slash).
    pub fn submit(&self, input: &str) -> CommandOutcome {
        self.execute(&format!("/{}", input.trim().to_lowercase()))
    }
}

/// Input text to put in the box when a suggestion is picked.
pub fn completion(command: &dyn Command) -> &str {
    command.name().strip_prefix('/').unwrap_or(command.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CommandEntry, Manifest, QuoteBook};
    use crate::content::ContentItem;
    use serde_json::json;

    fn palette() -> CommandPalette {
        let mut help = CommandEntry::new("/help", "Show help");
        help.title = Some("Help".into());
        help.content = vec![json!({"type": "text", "text": "Type a command"})];
        let catalog = Catalog::new(
            Manifest {
                commands: vec![
                    CommandEntry::new("/hydraulics", "Water systems"),
                    help,
                    CommandEntry::new("/about", "About"),
                ],
            },
            QuoteBook::default(),
        );
        CommandPalette::from_catalog(&catalog, &CommandRegistry::builtin())
    }

    fn names<'a>(commands: &[&'a dyn Command]) -> Vec<&'a str> {
        commands.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_blank_input_lists_all_sorted() {
        let palette = palette();
        assert_eq!(
            names(&palette.suggestions("  ")),
            vec!["/about", "/builder", "/help", "/hydraulics"]
        );
    }

    #[test]
    fn test_prefix_match_lowercases_input() {
        let palette = palette();
        assert_eq!(names(&palette.suggestions("H")), vec!["/help", "/hydraulics"]);
        assert_eq!(names(&palette.suggestions("hy")), vec!["/hydraulics"]);
        assert!(palette.suggestions("zzz").is_empty());
    }

    #[test]
    fn test_submit() {
        let palette = palette();
        assert_eq!(
            palette.submit("  HELP "),
            CommandOutcome::ShowModal(ModalContent::new(
                "Help",
                vec![ContentItem::text("Type a command")]
            ))
        );
        assert_eq!(palette.submit("builder"), CommandOutcome::OpenBuilder);
        assert_eq!(palette.submit("nothing"), CommandOutcome::Unknown);
        assert_eq!(palette.submit(""), CommandOutcome::Unknown);
    }

    #[test]
    fn test_completion_strips_slash() {
        let palette = palette();
        let help = palette.find("/help").unwrap();
        assert_eq!(completion(help), "help");
    }

    #[test]
    fn test_empty_palette() {
        let palette = CommandPalette::default();
        assert!(palette.is_empty());
        assert!(palette.suggestions("").is_empty());
        assert_eq!(palette.execute("/about"), CommandOutcome::Unknown);
    }
}
