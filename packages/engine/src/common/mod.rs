// Common types and utilities shared across the engine

pub mod entity_ids;
pub mod error;
pub mod id;
pub mod pagination;

pub use entity_ids::*;
pub use error::{EngineError, EngineResult};
pub use id::Id;
pub use pagination::{PageArgs, Paginated, ValidatedPageArgs, MAX_PAGE_SIZE};
