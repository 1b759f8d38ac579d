pub mod actions;
pub mod models;

// Re-export models (domain models)
pub use models::account::Account;
pub use models::follow::{Follow, FollowStatus};
