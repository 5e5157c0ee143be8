pub mod markdown;
pub mod truncation;

pub use markdown::markdown_to_html;
