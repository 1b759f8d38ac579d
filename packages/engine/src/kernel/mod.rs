//! Kernel module - engine infrastructure and dependencies.

pub mod deps;

pub use deps::EngineDeps;
