//! Posts domain: base posts, specializations, media, localizations,
//! reactions, and comments.

pub mod actions;
pub mod data;
pub mod models;
