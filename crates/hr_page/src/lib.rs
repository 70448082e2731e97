pub mod archive;
pub mod bindings;
pub mod context;
pub mod dom;
pub mod markup;
pub mod page;
pub mod screen;
pub mod views;

pub use context::{HistoryContext, PageContext};
pub use dom::{Document, NodeId};
pub use page::{Event, Page, PageState, PendingRewrite, Route};

pub mod prelude {
    pub use crate::{Document, Event, NodeId, Page, PageState, Route};
    pub use hr_core::{Failure, Headline, Result, Rewrite};
}
