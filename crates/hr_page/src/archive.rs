//! Moving the live headline into the history panel.
//!
//! The archived block is rendered afresh from the live headline's data rather
//! than copied from the live nodes, so it never carries element ids.

use hr_core::{Headline, Rewrite};
use tracing::info;

use crate::bindings::Binding;
use crate::context::PageContext;
use crate::screen::Screen;
use crate::views::{headline_block, render_headline, BlockMode, HeadlineBlock};

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub headline: Headline,
    /// Display order, newest first.
    pub rewrites: Vec<Rewrite>,
}

/// Archive the live headline if it has any rewrites.
///
/// Returns the new history block, or `None` when there was nothing to archive.
pub fn archive_current_headline(
    screen: &mut Screen,
    ctx: &PageContext,
    headline: Option<&Headline>,
) -> Option<HeadlineBlock> {
    if screen.doc.child_count(ctx.rewrite_list) == 0 {
        return None;
    }
    let headline = headline?.clone();
    let snapshot = Snapshot {
        rewrites: screen.rewrites_in(ctx.rewrite_list),
        headline,
    };

    screen.clear_list(ctx.rewrite_list);

    let block = render_archived(screen, &snapshot);
    screen.doc.prepend_child(ctx.history_panel, block.root);
    screen.doc.set_hidden(ctx.history_heading, false);

    info!(
        "🗄️ Archived headline {} with {} rewrite(s)",
        snapshot.headline.id,
        snapshot.rewrites.len()
    );
    Some(block)
}

/// Build a detached, fully bound history block from `snapshot`.
pub fn render_archived(screen: &mut Screen, snapshot: &Snapshot) -> HeadlineBlock {
    let block = headline_block(&mut screen.doc, BlockMode::Archived);
    render_headline(&mut screen.doc, block.heading, block.link, &snapshot.headline);

    // Rendering prepends, so go oldest first to keep the display order
    for rewrite in snapshot.rewrites.iter().rev() {
        screen.show_rewrite(rewrite, block.list);
    }

    if let (Some(form), Some(input)) = (block.form, block.input) {
        screen.bindings.bind(
            form,
            Binding::RewriteForm {
                headline_id: snapshot.headline.id.clone(),
                input,
                list: block.list,
            },
        );
    }
    block
}
