use std::sync::Arc;

use hr_client::ScoringClient;
use hr_core::{Error, Headline, Result, Rewrite, RewriteRequest, ScoreResult};
use tracing::{debug, info, warn};

use crate::archive::archive_current_headline;
use crate::bindings::Binding;
use crate::context::{HistoryContext, PageContext};
use crate::dom::{Document, NodeId};
use crate::markup;
use crate::screen::Screen;
use crate::views::{self, headline_block, render_headline, BlockMode, RenderedRewrite};

/// Which page a path loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Compose,
    History,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/rewrites" => Route::History,
            _ => Route::Compose,
        }
    }

    /// A fresh skeleton for this route.
    pub fn document(self) -> Document {
        match self {
            Route::Compose => markup::compose_page(),
            Route::History => markup::history_page(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Nothing rendered yet, or the first headline fetch failed.
    Init,
    HeadlineShown,
    /// The live headline has this many rewrites.
    RewriteShown(usize),
    HistoryLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Submit(NodeId),
    Click(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Compose(PageContext),
    History(HistoryContext),
}

/// A submission whose target was fixed when it was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRewrite {
    pub request: RewriteRequest,
    pub list: NodeId,
}

pub struct Page {
    screen: Screen,
    client: Arc<dyn ScoringClient>,
    surface: Surface,
    live: Option<Headline>,
    loaded: bool,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("client", &self.client.name())
            .field("surface", &self.surface)
            .field("live", &self.live.as_ref().map(|h| &h.id))
            .finish()
    }
}

impl Page {
    /// Bind to an existing document without touching the network.
    pub fn new(doc: Document, client: Arc<dyn ScoringClient>, route: Route) -> Result<Self> {
        let surface = match route {
            Route::Compose => Surface::Compose(PageContext::bind(&doc)?),
            Route::History => Surface::History(HistoryContext::bind(&doc)?),
        };
        Ok(Self {
            screen: Screen::new(doc),
            client,
            surface,
            live: None,
            loaded: false,
        })
    }

    /// Build the page for `path` and run its load step.
    pub async fn open(client: Arc<dyn ScoringClient>, path: &str) -> Result<Self> {
        let route = Route::from_path(path);
        info!("🧭 Opening {} as {:?}", path, route);
        let mut page = Self::new(route.document(), client, route)?;
        page.init().await;
        Ok(page)
    }

    pub async fn init(&mut self) {
        match self.surface {
            Surface::Compose(ctx) => {
                self.screen.bindings.bind(ctx.switch_form, Binding::SwitchHeadline);
                self.show_headline(None).await;
            }
            Surface::History(_) => self.load_history().await,
        }
    }

    pub fn document(&self) -> &Document {
        &self.screen.doc
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn compose_context(&self) -> Option<PageContext> {
        match self.surface {
            Surface::Compose(ctx) => Some(ctx),
            Surface::History(_) => None,
        }
    }

    pub fn history_context(&self) -> Option<HistoryContext> {
        match self.surface {
            Surface::History(ctx) => Some(ctx),
            Surface::Compose(_) => None,
        }
    }

    pub fn live_headline(&self) -> Option<&Headline> {
        self.live.as_ref()
    }

    pub fn state(&self) -> PageState {
        match self.surface {
            Surface::History(_) if self.loaded => PageState::HistoryLoaded,
            Surface::History(_) => PageState::Init,
            Surface::Compose(ctx) => match (&self.live, self.screen.doc.child_count(ctx.rewrite_list)) {
                (None, _) => PageState::Init,
                (Some(_), 0) => PageState::HeadlineShown,
                (Some(_), n) => PageState::RewriteShown(n),
            },
        }
    }

    fn body(&self) -> NodeId {
        match self.surface {
            Surface::Compose(ctx) => ctx.body,
            Surface::History(ctx) => ctx.body,
        }
    }

    /// Render `headline` into the live slot, fetching one first when `None`.
    ///
    /// A failed fetch shows a notification and leaves the slot untouched.
    pub async fn show_headline(&mut self, headline: Option<Headline>) -> Option<&Headline> {
        let Surface::Compose(ctx) = self.surface else {
            return None;
        };
        let headline = match headline {
            Some(headline) => headline,
            None => match self.client.random_headline().await {
                Ok(headline) => headline,
                Err(failure) => {
                    warn!("Headline fetch failed: {}", failure);
                    self.screen.notify_failure(ctx.body, &failure);
                    return None;
                }
            },
        };

        render_headline(&mut self.screen.doc, ctx.heading, ctx.link, &headline);
        self.screen.bindings.bind(
            ctx.rewrite_form,
            Binding::RewriteForm {
                headline_id: headline.id.clone(),
                input: ctx.rewrite_input,
                list: ctx.rewrite_list,
            },
        );
        info!("📰 Showing headline {} ({})", headline.id, headline.source);
        self.live = Some(headline);
        self.live.as_ref()
    }

    /// Fetch a new headline, then archive the live one (if it has rewrites)
    /// and show the new one.
    ///
    /// A failed fetch leaves the live headline, its list and its form as they
    /// were.
    pub async fn switch_headline(&mut self) -> Option<&Headline> {
        let Surface::Compose(ctx) = self.surface else {
            return None;
        };
        let next = match self.client.random_headline().await {
            Ok(headline) => headline,
            Err(failure) => {
                warn!("Headline switch failed: {}", failure);
                self.screen.notify_failure(ctx.body, &failure);
                return None;
            }
        };
        archive_current_headline(&mut self.screen, &ctx, self.live.as_ref());
        self.show_headline(Some(next)).await
    }

    /// Type into a text input, as a user would before submitting.
    pub fn type_text(&mut self, input: NodeId, text: &str) {
        self.screen.doc.set_attr(input, "value", text);
    }

    /// Read and reset the form's input and fix the target list.
    pub fn begin_rewrite(&mut self, form: NodeId) -> Result<PendingRewrite> {
        let Some(Binding::RewriteForm { headline_id, input, list }) =
            self.screen.bindings.get(form).cloned()
        else {
            return Err(Error::Unbound(form.index()));
        };
        let text = self
            .screen
            .doc
            .attr(input, "value")
            .unwrap_or_default()
            .to_string();
        self.screen.doc.remove_attr(input, "value");

        debug!("✍️ Submitting rewrite for headline {}", headline_id);
        Ok(PendingRewrite {
            request: RewriteRequest { text, headline_id },
            list,
        })
    }

    /// Render the outcome of a submission into the list it was aimed at.
    ///
    /// Completions land in arrival order; the latest one ends up on top.
    pub fn complete_rewrite(
        &mut self,
        pending: PendingRewrite,
        result: ScoreResult<Rewrite>,
    ) -> Option<RenderedRewrite> {
        match result {
            Ok(rewrite) => {
                info!(
                    "✨ Rewrite {} scored, difference {}",
                    rewrite.id,
                    hr_core::sentiment::difference_percent(rewrite.sentiment_match)
                );
                Some(self.screen.show_rewrite(&rewrite, pending.list))
            }
            Err(failure) => {
                warn!("Rewrite for {} rejected: {}", pending.request.headline_id, failure);
                let body = self.body();
                self.screen.notify_failure(body, &failure);
                None
            }
        }
    }

    pub async fn submit_rewrite(&mut self, form: NodeId) -> Result<Option<RenderedRewrite>> {
        let pending = self.begin_rewrite(form)?;
        let result = self.client.submit_rewrite(&pending.request).await;
        Ok(self.complete_rewrite(pending, result))
    }

    /// Remove the block right away, then tell the backend. A failed delete is
    /// only logged.
    pub async fn delete_rewrite(&mut self, rewrite_id: &str, block: NodeId) {
        self.screen.remove_rewrite(block);
        info!("🗑️ Deleted rewrite {}", rewrite_id);
        if let Err(failure) = self.client.delete_rewrite(rewrite_id).await {
            warn!("Delete of rewrite {} failed: {}", rewrite_id, failure);
        }
    }

    pub async fn dispatch(&mut self, event: Event) -> Result<()> {
        let node = match event {
            Event::Submit(node) | Event::Click(node) => node,
        };
        let binding = self
            .screen
            .bindings
            .get(node)
            .cloned()
            .ok_or(Error::Unbound(node.index()))?;

        match (event, binding) {
            (Event::Submit(form), Binding::RewriteForm { .. }) => {
                self.submit_rewrite(form).await?;
            }
            (Event::Submit(_), Binding::SwitchHeadline) => {
                self.switch_headline().await;
            }
            (Event::Click(_), Binding::DeleteRewrite { rewrite_id, block }) => {
                self.delete_rewrite(&rewrite_id, block).await;
            }
            (Event::Click(button), Binding::CloseNotification { block }) => {
                self.screen.bindings.unbind(button);
                views::close_notification(&mut self.screen.doc, block);
            }
            (event, binding) => {
                debug!("Ignoring {:?} on node bound to {:?}", event, binding);
            }
        }
        Ok(())
    }

    /// Fetch the user's history and render every headline with its rewrites.
    pub async fn load_history(&mut self) {
        let Surface::History(ctx) = self.surface else {
            return;
        };
        match self.client.user_history().await {
            Ok(headlines) => {
                info!("📚 Loaded {} headline(s) of history", headlines.len());
                for headline in &headlines {
                    let block = headline_block(&mut self.screen.doc, BlockMode::ReadOnly);
                    render_headline(&mut self.screen.doc, block.heading, block.link, headline);
                    if let Some(rewrites) = &headline.rewrites {
                        self.screen.show_rewrites(rewrites, block.list);
                    }
                    self.screen.doc.append_child(ctx.container, block.root);
                }
            }
            Err(failure) => {
                warn!("History fetch failed: {}", failure);
                self.screen.notify_failure(ctx.body, &failure);
            }
        }
        self.loaded = true;
    }

    pub fn to_html(&self) -> String {
        self.screen.doc.to_html(self.screen.doc.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/"), Route::Compose);
        assert_eq!(Route::from_path("/rewrites"), Route::History);
        assert_eq!(Route::from_path("/rewrites/"), Route::History);
        assert_eq!(Route::from_path("/about"), Route::Compose);
    }
}
