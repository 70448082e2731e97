pub mod http;
pub mod scripted;
