pub mod language;
pub mod post_type;

pub use language::*;
pub use post_type::*;
