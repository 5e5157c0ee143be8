pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod prompts;
pub mod report;
pub mod service;
pub mod storage;
pub mod utils;
