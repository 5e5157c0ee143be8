pub mod types;

pub use types::SonarchatError;
