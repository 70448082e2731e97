//! Plain-text view of a page for the terminal.

use std::fmt::Write;

use hr_page::{Document, NodeId, Page};

fn line_of(doc: &Document, node: NodeId, class: &str) -> String {
    doc.first_by_class(node, class)
        .map(|n| doc.text_content(n))
        .unwrap_or_default()
}

fn write_block(out: &mut String, doc: &Document, block: NodeId, indent: &str) {
    let heading = line_of(doc, block, "headline");
    let affect = line_of(doc, block, "affect-label");
    let _ = writeln!(out, "{}📰 {} [{}]", indent, heading, affect);
    if let Some(link) = doc.first_by_class(block, "headline-link") {
        if let Some(href) = doc.attr(link, "href") {
            let _ = writeln!(out, "{}   {}", indent, href);
        }
    }

    let Some(list) = doc.first_by_class(block, "rewrite-list") else {
        return;
    };
    for (i, rewrite) in doc.children(list).iter().enumerate() {
        let _ = writeln!(
            out,
            "{}   {}. {} [{}] {}",
            indent,
            i + 1,
            line_of(doc, *rewrite, "rewrite-text"),
            line_of(doc, *rewrite, "affect-label"),
            line_of(doc, *rewrite, "difference-label"),
        );
    }
}

pub fn outline(page: &Page) -> String {
    let doc = page.document();
    let mut out = String::new();

    if let Some(ctx) = page.compose_context() {
        write_block(&mut out, doc, ctx.block, "");
        let archived = doc.children(ctx.history_panel);
        if !archived.is_empty() {
            let _ = writeln!(out, "\n{}", doc.text_content(ctx.history_heading));
            for (i, block) in archived.iter().enumerate() {
                let _ = writeln!(out, "  #{}", i + 1);
                write_block(&mut out, doc, *block, "  ");
            }
        }
    }

    if let Some(ctx) = page.history_context() {
        let blocks = doc.children(ctx.container);
        if blocks.is_empty() {
            let _ = writeln!(out, "No rewrites yet.");
        }
        for block in blocks {
            write_block(&mut out, doc, *block, "");
        }
    }

    for note in doc.find_by_class(doc.body(), "notification") {
        let message = line_of(doc, note, "notification-message");
        let links: Vec<&str> = doc
            .find_by_tag(note, "a")
            .into_iter()
            .filter_map(|a| doc.attr(a, "href"))
            .collect();
        if links.is_empty() {
            let _ = writeln!(out, "⚠️ {}", message);
        } else {
            let _ = writeln!(out, "⚠️ {} ({})", message, links.join(", "));
        }
    }
    out
}
