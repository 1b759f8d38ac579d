pub mod comment;
pub mod post;

pub use comment::CommentNode;
pub use post::{MediaData, PostData};
