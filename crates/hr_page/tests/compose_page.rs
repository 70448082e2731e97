use std::sync::Arc;

use hr_client::clients::scripted::{Recorded, ScriptedScoringClient};
use hr_core::{Failure, RewriteRequest, AUTH_REQUIRED};
use hr_page::{Event, Page, PageState};

mod common;
use common::{headline, rewrite};

async fn open_with(client: &Arc<ScriptedScoringClient>) -> Page {
    Page::open(client.clone(), "/").await.unwrap()
}

fn hrefs(page: &Page) -> Vec<String> {
    let doc = page.document();
    doc.find_by_tag(doc.body(), "a")
        .into_iter()
        .filter_map(|a| doc.attr(a, "href").map(String::from))
        .collect()
}

#[tokio::test]
async fn test_first_headline_is_rendered() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;

    let page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();
    let doc = page.document();

    assert_eq!(doc.text_content(ctx.heading), "X wins Source: BBC");
    assert_eq!(doc.attr(ctx.heading, "data-id"), Some("h1"));
    assert_eq!(doc.attr(ctx.link, "href"), Some("https://a"));
    assert!(doc.text_content(ctx.link).contains("Positive (42% certainty)"));
    assert_eq!(page.state(), PageState::HeadlineShown);
}

#[tokio::test]
async fn test_failed_first_fetch_shows_notification() {
    let client = Arc::new(ScriptedScoringClient::new());
    client
        .push_headline(Err(Failure::application("No headline available.")))
        .await;

    let page = open_with(&client).await;
    let doc = page.document();

    let notes = doc.find_by_class(doc.body(), "notification");
    assert_eq!(notes.len(), 1);
    assert!(doc.text_content(notes[0]).contains("No headline available."));
    assert_eq!(page.state(), PageState::Init);
}

#[tokio::test]
async fn test_submit_rewrite_renders_score() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;
    client.push_rewrite(Ok(rewrite("r1", "h1", "Y triumphs"))).await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();

    page.type_text(ctx.rewrite_input, "Y triumphs");
    page.dispatch(Event::Submit(ctx.rewrite_form)).await.unwrap();

    let doc = page.document();
    assert!(!doc.is_hidden(ctx.rewrite_list));
    assert_eq!(doc.child_count(ctx.rewrite_list), 1);
    let entry = doc.children(ctx.rewrite_list)[0];
    assert!(doc.text_content(entry).contains("Difference: 30"));
    let bar = doc.first_by_class(entry, "difference").unwrap();
    assert_eq!(doc.attr(bar, "style"), Some("width: 15%"));

    // The form was reset
    assert_eq!(doc.attr(ctx.rewrite_input, "value"), None);
    assert_eq!(page.state(), PageState::RewriteShown(1));

    assert_eq!(
        client.requests().await[1],
        Recorded::SubmitRewrite(RewriteRequest {
            text: "Y triumphs".to_string(),
            headline_id: "h1".to_string(),
        })
    );
}

#[tokio::test]
async fn test_auth_error_shows_login_prompt() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;
    client.push_rewrite(Err(Failure::application(AUTH_REQUIRED))).await;
    client
        .push_rewrite(Err(Failure::application("Error saving to database.")))
        .await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();

    page.type_text(ctx.rewrite_input, "Y triumphs");
    page.dispatch(Event::Submit(ctx.rewrite_form)).await.unwrap();

    let links = hrefs(&page);
    assert!(links.contains(&"/login".to_string()));
    assert!(links.contains(&"/signup".to_string()));
    assert_eq!(page.document().child_count(ctx.rewrite_list), 0);
    assert!(page.document().is_hidden(ctx.rewrite_list));

    // Any other error is plain text
    page.type_text(ctx.rewrite_input, "again");
    page.dispatch(Event::Submit(ctx.rewrite_form)).await.unwrap();
    let doc = page.document();
    let notes = doc.find_by_class(doc.body(), "notification");
    assert_eq!(notes.len(), 2);
    assert!(doc.find_by_tag(notes[1], "a").is_empty());
    assert!(doc.text_content(notes[1]).contains("Error saving to database."));
}

#[tokio::test]
async fn test_close_notification() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Err(Failure::Transport("refused".to_string()))).await;

    let mut page = open_with(&client).await;
    let doc = page.document();
    let note = doc.find_by_class(doc.body(), "notification")[0];
    let close = doc.first_by_class(note, "close").unwrap();

    page.dispatch(Event::Click(close)).await.unwrap();
    assert!(!page.document().is_attached(note));

    // The close control is spent
    assert!(page.dispatch(Event::Click(close)).await.is_err());
}

#[tokio::test]
async fn test_delete_rewrites() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;
    for id in ["r1", "r2", "r3"] {
        client.push_rewrite(Ok(rewrite(id, "h1", id))).await;
    }
    client.push_delete(Err(Failure::Transport("refused".to_string()))).await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();
    for text in ["a", "b", "c"] {
        page.type_text(ctx.rewrite_input, text);
        page.submit_rewrite(ctx.rewrite_form).await.unwrap();
    }
    let blocks = page.document().children(ctx.rewrite_list).to_vec();
    assert_eq!(blocks.len(), 3);

    // Delete the middle one; the failed request does not bring it back
    let delete = page.document().first_by_class(blocks[1], "delete-rewrite").unwrap();
    page.dispatch(Event::Click(delete)).await.unwrap();
    assert_eq!(page.document().children(ctx.rewrite_list), &[blocks[0], blocks[2]]);
    assert!(!page.document().is_hidden(ctx.rewrite_list));

    for block in [blocks[0], blocks[2]] {
        let delete = page.document().first_by_class(block, "delete-rewrite").unwrap();
        page.dispatch(Event::Click(delete)).await.unwrap();
    }
    assert_eq!(page.document().child_count(ctx.rewrite_list), 0);
    assert!(page.document().is_hidden(ctx.rewrite_list));
    assert_eq!(page.state(), PageState::HeadlineShown);

    let deletes: Vec<_> = client
        .requests()
        .await
        .into_iter()
        .filter_map(|r| match r {
            Recorded::DeleteRewrite(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(deletes, vec!["r2", "r3", "r1"]);
}

#[tokio::test]
async fn test_switch_headline_archives_block() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;
    client.push_rewrite(Ok(rewrite("r1", "h1", "Y triumphs"))).await;
    client.push_headline(Ok(headline("h2", "Z falls", -0.3))).await;
    client.push_headline(Ok(headline("h3", "W waits", 0.0))).await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();

    page.type_text(ctx.rewrite_input, "Y triumphs");
    page.dispatch(Event::Submit(ctx.rewrite_form)).await.unwrap();
    page.dispatch(Event::Submit(ctx.switch_form)).await.unwrap();

    {
        let doc = page.document();
        assert_eq!(doc.child_count(ctx.history_panel), 1);
        assert!(!doc.is_hidden(ctx.history_heading));
        let archived = doc.children(ctx.history_panel)[0];
        assert!(doc.text_content(archived).contains("X wins Source: BBC"));
        assert!(doc.text_content(archived).contains("Y triumphs"));
        assert!(doc
            .descendants(archived)
            .iter()
            .all(|n| doc.attr(*n, "id").is_none()));
        assert!(doc.first_by_class(archived, "switch-headline").is_none());

        assert_eq!(doc.text_content(ctx.heading), "Z falls Source: BBC");
        assert_eq!(doc.child_count(ctx.rewrite_list), 0);
        assert!(doc.is_hidden(ctx.rewrite_list));
    }
    assert_eq!(page.state(), PageState::HeadlineShown);
    assert_eq!(page.live_headline().unwrap().id, "h2");

    // Switching with no rewrites leaves the history alone
    page.dispatch(Event::Submit(ctx.switch_form)).await.unwrap();
    assert_eq!(page.document().child_count(ctx.history_panel), 1);
    assert_eq!(page.document().text_content(ctx.heading), "W waits Source: BBC");
}

#[tokio::test]
async fn test_failed_switch_keeps_live_headline() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;
    client.push_rewrite(Ok(rewrite("r1", "h1", "first"))).await;
    client
        .push_headline(Err(Failure::Transport("connection refused".to_string())))
        .await;
    client.push_rewrite(Ok(rewrite("r2", "h1", "second"))).await;
    client.push_headline(Ok(headline("h2", "Z falls", -0.3))).await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();
    page.type_text(ctx.rewrite_input, "first");
    page.dispatch(Event::Submit(ctx.rewrite_form)).await.unwrap();
    page.dispatch(Event::Submit(ctx.switch_form)).await.unwrap();

    // Nothing archived; h1 stays live with its rewrite
    {
        let doc = page.document();
        assert_eq!(doc.child_count(ctx.history_panel), 0);
        assert!(doc.is_hidden(ctx.history_heading));
        assert_eq!(doc.text_content(ctx.heading), "X wins Source: BBC");
        assert_eq!(doc.child_count(ctx.rewrite_list), 1);
        assert_eq!(doc.find_by_class(doc.body(), "notification").len(), 1);
    }
    assert_eq!(page.live_headline().unwrap().id, "h1");
    assert_eq!(page.state(), PageState::RewriteShown(1));

    page.type_text(ctx.rewrite_input, "second");
    page.dispatch(Event::Submit(ctx.rewrite_form)).await.unwrap();
    page.dispatch(Event::Submit(ctx.switch_form)).await.unwrap();

    // One archived block carrying both rewrites
    let doc = page.document();
    assert_eq!(doc.child_count(ctx.history_panel), 1);
    let archived = doc.children(ctx.history_panel)[0];
    let list = doc.first_by_class(archived, "rewrite-list").unwrap();
    let ids: Vec<String> = page.screen().rewrites_in(list).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["r2", "r1"]);
    assert_eq!(page.live_headline().unwrap().id, "h2");
    assert_eq!(page.state(), PageState::HeadlineShown);
}

#[tokio::test]
async fn test_archived_block_accepts_rewrites() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;
    client.push_rewrite(Ok(rewrite("r1", "h1", "first"))).await;
    client.push_headline(Ok(headline("h2", "Z falls", -0.3))).await;
    client.push_rewrite(Ok(rewrite("r2", "h1", "second"))).await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();
    page.type_text(ctx.rewrite_input, "first");
    page.submit_rewrite(ctx.rewrite_form).await.unwrap();
    page.switch_headline().await;

    let doc = page.document();
    let archived = doc.children(ctx.history_panel)[0];
    let form = doc.first_by_class(archived, "rewrite-form").unwrap();
    let input = doc.find_by_tag(form, "input")[0];
    let list = doc.first_by_class(archived, "rewrite-list").unwrap();

    page.type_text(input, "second");
    page.dispatch(Event::Submit(form)).await.unwrap();

    // Scoped to the archived headline and list, not the live ones
    let submitted = client.requests().await;
    assert_eq!(
        submitted.last(),
        Some(&Recorded::SubmitRewrite(RewriteRequest {
            text: "second".to_string(),
            headline_id: "h1".to_string(),
        }))
    );
    let ids: Vec<String> = page.screen().rewrites_in(list).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["r2", "r1"]);
    assert_eq!(page.document().child_count(ctx.rewrite_list), 0);
}

#[tokio::test]
async fn test_overlapping_submissions_last_arrival_wins() {
    let client = Arc::new(ScriptedScoringClient::new());
    client.push_headline(Ok(headline("h1", "X wins", 0.42))).await;

    let mut page = open_with(&client).await;
    let ctx = page.compose_context().unwrap();

    page.type_text(ctx.rewrite_input, "one");
    let first = page.begin_rewrite(ctx.rewrite_form).unwrap();
    page.type_text(ctx.rewrite_input, "two");
    let second = page.begin_rewrite(ctx.rewrite_form).unwrap();

    // The second response arrives first
    let b = page
        .complete_rewrite(second, Ok(rewrite("r2", "h1", "two")))
        .unwrap();
    let a = page
        .complete_rewrite(first, Ok(rewrite("r1", "h1", "one")))
        .unwrap();

    assert_eq!(page.document().children(ctx.rewrite_list), &[a.block, b.block]);
}
