pub mod account;
pub mod follow;

pub use account::*;
pub use follow::*;
