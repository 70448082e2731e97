pub mod graph;
pub mod headline;
pub mod notification;
pub mod rewrite;

pub use headline::{headline_block, render_headline, BlockMode, HeadlineBlock};
pub use notification::{close_notification, show_failure, show_notification, Notification};
pub use rewrite::{delete_rewrite_block, render_rewrite, render_rewrite_list, RenderedRewrite};
