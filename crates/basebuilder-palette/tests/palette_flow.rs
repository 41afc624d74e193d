//! Loading a data directory and driving the palette like the landing page.

use basebuilder_palette::{Catalog, CommandOutcome, CommandPalette, CommandRegistry, ContentItem};
use std::fs;

const INFO: &str = r#"{
  "commands": [
    {
      "name": "/about",
      "description": "Credits",
      "handler": "about",
      "title": "About this site",
      "content": [
        {"type": "text", "header": "Who", "text": "Made by fans /n for fans"},
        {"type": "carousel", "images": []},
        {"type": "list", "header": "Thanks", "items": ["Funcom"]}
      ]
    },
    {
      "name": "/fief",
      "description": "Fief rules",
      "title": "Fief",
      "content": [{"type": "infobox", "text": "A fief is 5x5 cells"}]
    },
    {"name": "/broken", "description": "Bad handler", "handler": "missing"}
  ]
}"#;

const QUOTES: &str = r#"{"quotes": [{"text": "The spice must flow.", "speaker": "Guild Navigator"}]}"#;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn full_data_directory() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("info.json"), INFO).unwrap();
    fs::write(dir.path().join("quotes.json"), QUOTES).unwrap();

    let catalog = Catalog::load_dir(dir.path());
    let palette = CommandPalette::from_catalog(&catalog, &CommandRegistry::builtin());

    let names: Vec<&str> = palette.suggestions("").into_iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["/about", "/builder", "/fief", "/quote"]);

    let CommandOutcome::ShowModal(about) = palette.submit("About") else {
        panic!("about should open a modal");
    };
    assert_eq!(about.title, "About this site");
    assert_eq!(about.items.len(), 2);
    assert_eq!(
        about.render_text(),
        "About this site\n\n## Who\nMade by fans\nfor fans\n\n## Thanks\n- Funcom"
    );

    let CommandOutcome::ShowModal(quote) = palette.submit("quote") else {
        panic!("quote should open a modal");
    };
    assert_eq!(quote.items[0], ContentItem::quote("The spice must flow."));

    assert_eq!(palette.submit("builder"), CommandOutcome::OpenBuilder);
    assert_eq!(palette.submit("broken"), CommandOutcome::Unknown);
}

#[test]
fn corrupt_manifest_still_offers_builtins() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("info.json"), "{ not json").unwrap();

    let catalog = Catalog::load_dir(dir.path());
    let palette = CommandPalette::from_catalog(&catalog, &CommandRegistry::builtin());

    let names: Vec<&str> = palette.commands().map(|c| c.name()).collect();
    assert_eq!(names, vec!["/builder"]);
}
