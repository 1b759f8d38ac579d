pub mod follow;

pub use follow::{follow, unfollow};
