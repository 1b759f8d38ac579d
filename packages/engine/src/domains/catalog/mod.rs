pub mod models;

pub use models::{Language, PostType};
