pub mod error;
pub mod sentiment;
pub mod types;

pub use error::{ApplicationError, Error, Failure, Result, ScoreResult, AUTH_REQUIRED};
pub use types::{
    ErrorResponse, Headline, HeadlineEnvelope, HistoryEnvelope, Rewrite, RewriteEnvelope,
    RewriteRequest,
};
