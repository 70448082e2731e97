use hr_core::{Error, Result};
use hr_page::{Event, NodeId, Page};

/// One line of input in a compose session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rewrite the live headline.
    Rewrite(String),
    /// Rewrite the Nth archived headline (1 = most recent).
    RewriteArchived(usize, String),
    Switch,
    /// Delete the Nth rewrite of the live headline (1 = top).
    Delete(usize),
    Close,
    /// Open the full-history page with the same session.
    History,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
<text>            rewrite the current headline
:to N <text>      rewrite archived headline N (1 = most recent)
:switch           archive the current headline and fetch a new one
:delete N         delete rewrite N of the current headline (1 = top)
:close            dismiss all notifications
:history          list everything rewritten in this session
:show             print the page
:help             this text
:quit             leave";

pub fn parse(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(Command::Rewrite(line.to_string())));
    };

    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();
    let index = |s: &str| -> std::result::Result<usize, String> {
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("Expected a positive number, got '{}'", s)),
        }
    };

    let command = match name {
        "switch" | "s" => Command::Switch,
        "delete" | "d" => Command::Delete(index(args)?),
        "to" => {
            let (n, text) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            let text = text.trim();
            if text.is_empty() {
                return Err("Usage: :to N <text>".to_string());
            }
            Command::RewriteArchived(index(n)?, text.to_string())
        }
        "close" | "c" => Command::Close,
        "history" => Command::History,
        "show" => Command::Show,
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command ':{}'", other)),
    };
    Ok(Some(command))
}

fn nth(nodes: &[NodeId], n: usize, what: &str) -> Result<NodeId> {
    n.checked_sub(1)
        .and_then(|i| nodes.get(i))
        .copied()
        .ok_or_else(|| Error::External(anyhow::anyhow!("No {} #{}", what, n)))
}

/// Apply a command to the page by dispatching the matching DOM event.
pub async fn execute(page: &mut Page, command: &Command) -> Result<()> {
    let ctx = page
        .compose_context()
        .ok_or_else(|| Error::MissingHook("#main-rewrite-container".to_string()))?;

    match command {
        Command::Rewrite(text) => {
            page.type_text(ctx.rewrite_input, text);
            page.dispatch(Event::Submit(ctx.rewrite_form)).await
        }
        Command::RewriteArchived(n, text) => {
            let doc = page.document();
            let block = nth(doc.children(ctx.history_panel), *n, "archived headline")?;
            let form = doc
                .first_by_class(block, "rewrite-form")
                .ok_or_else(|| Error::MissingHook(".rewrite-form".to_string()))?;
            let input = doc
                .find_by_tag(form, "input")
                .first()
                .copied()
                .ok_or_else(|| Error::MissingHook(".rewrite-form input".to_string()))?;
            page.type_text(input, text);
            page.dispatch(Event::Submit(form)).await
        }
        Command::Switch => page.dispatch(Event::Submit(ctx.switch_form)).await,
        Command::Delete(n) => {
            let doc = page.document();
            let block = nth(doc.children(ctx.rewrite_list), *n, "rewrite")?;
            let button = doc
                .first_by_class(block, "delete-rewrite")
                .ok_or_else(|| Error::MissingHook(".delete-rewrite".to_string()))?;
            page.dispatch(Event::Click(button)).await
        }
        Command::Close => {
            let doc = page.document();
            let buttons: Vec<NodeId> = doc
                .find_by_class(doc.body(), "notification")
                .into_iter()
                .filter_map(|note| doc.first_by_class(note, "close"))
                .collect();
            for button in buttons {
                page.dispatch(Event::Click(button)).await?;
            }
            Ok(())
        }
        Command::History | Command::Show | Command::Help | Command::Quit => Ok(()),
    }
}
