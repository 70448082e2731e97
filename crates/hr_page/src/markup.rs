//! Page skeletons carrying the hooks the controller binds to.

use crate::dom::Document;
use crate::views::headline::{headline_block, BlockMode};

pub const HISTORY_PANEL: &str = "old-rewrites";
pub const HISTORY_HEADING: &str = "old-rewrites-heading";
pub const ALL_REWRITES: &str = "all-rewrites";

/// The interactive page: live headline block plus an empty history panel.
pub fn compose_page() -> Document {
    let mut doc = Document::new();
    let main = doc.append_element(doc.body(), "main", &[]);

    let block = headline_block(&mut doc, BlockMode::Live);
    doc.append_child(main, block.root);

    let section = doc.append_element(main, "section", &["history"]);
    let heading = doc.append_element(section, "h2", &[]);
    doc.set_attr(heading, "id", HISTORY_HEADING);
    doc.set_text(heading, "Previous headlines");
    doc.set_hidden(heading, true);
    let panel = doc.append_element(section, "div", &[]);
    doc.set_attr(panel, "id", HISTORY_PANEL);

    doc
}

/// The read-only page listing every rewrite of the logged-in user.
pub fn history_page() -> Document {
    let mut doc = Document::new();
    let main = doc.append_element(doc.body(), "main", &[]);
    let heading = doc.append_element(main, "h1", &[]);
    doc.set_text(heading, "Your rewrites");
    let container = doc.append_element(main, "div", &[]);
    doc.set_attr(container, "id", ALL_REWRITES);
    doc
}
