pub mod chat;
pub mod health;
pub mod home;
pub mod report;
