pub mod template;

pub use template::{build_chat_prompt, load_template, sample_rows, DEFAULT_TEMPLATE};
