pub mod keyword;
pub mod models;

pub use models::{ChatReply, ChatRequest};
