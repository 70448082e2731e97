use hr_core::{Failure, AUTH_REQUIRED};

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub block: NodeId,
    pub close_button: NodeId,
}

/// Append a dismissible message to `body`.
///
/// The login prompt gets links to `/login` and `/signup`; anything else is
/// shown verbatim.
pub fn show_notification(doc: &mut Document, body: NodeId, message: &str) -> Notification {
    let block = doc.append_element(body, "div", &["notification"]);
    let close_button = doc.append_element(block, "button", &["close"]);
    doc.set_attr(close_button, "type", "button");
    doc.set_text(close_button, "×");

    let paragraph = doc.append_element(block, "p", &["notification-message"]);
    if message == AUTH_REQUIRED {
        doc.append_text(paragraph, "Please ");
        let login = doc.append_element(paragraph, "a", &[]);
        doc.set_attr(login, "href", "/login");
        doc.set_text(login, "log in");
        doc.append_text(paragraph, " or ");
        let signup = doc.append_element(paragraph, "a", &[]);
        doc.set_attr(signup, "href", "/signup");
        doc.set_text(signup, "sign up");
        doc.append_text(paragraph, " to make additional requests.");
    } else {
        doc.set_text(paragraph, message);
    }

    Notification {
        block,
        close_button,
    }
}

pub fn show_failure(doc: &mut Document, body: NodeId, failure: &Failure) -> Notification {
    match failure {
        Failure::Application(e) => show_notification(doc, body, &e.message),
        Failure::Transport(_) => show_notification(doc, body, &failure.to_string()),
    }
}

pub fn close_notification(doc: &mut Document, notification: NodeId) {
    doc.remove(notification);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(doc: &Document, root: NodeId) -> Vec<String> {
        doc.find_by_tag(root, "a")
            .into_iter()
            .filter_map(|a| doc.attr(a, "href").map(String::from))
            .collect()
    }

    #[test]
    fn test_auth_prompt_links() {
        let mut doc = Document::new();
        let body = doc.body();
        let note = show_notification(&mut doc, body, AUTH_REQUIRED);
        assert_eq!(hrefs(&doc, note.block), vec!["/login", "/signup"]);
    }

    #[test]
    fn test_plain_message() {
        let mut doc = Document::new();
        let body = doc.body();
        let note = show_notification(&mut doc, body, "Headline not found.");
        assert!(hrefs(&doc, note.block).is_empty());
        assert!(doc.text_content(note.block).ends_with("Headline not found."));

        close_notification(&mut doc, note.block);
        assert!(!doc.is_attached(note.block));
        assert_eq!(doc.child_count(body), 0);
    }

    #[test]
    fn test_transport_failure_message() {
        let mut doc = Document::new();
        let body = doc.body();
        let note = show_failure(&mut doc, body, &Failure::Transport("timed out".to_string()));
        assert!(doc
            .text_content(note.block)
            .ends_with("Could not reach the server: timed out"));
    }
}
