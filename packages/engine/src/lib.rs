// Content Publishing Engine - Core
//
// This crate provides the content-publishing and social-graph engine: posts
// with article/reel/normal specializations, ordered media, per-language
// localizations, reactions, comments, and the follow graph.
//
// Architecture follows domain-driven design: all SQL lives in
// domains/*/models, orchestration in domains/*/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
