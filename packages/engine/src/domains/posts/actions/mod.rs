pub mod comments;
pub mod create_post;
pub mod delete_post;
pub mod queries;
pub mod reactions;

pub use comments::*;
pub use create_post::*;
pub use delete_post::*;
pub use queries::*;
pub use reactions::*;
