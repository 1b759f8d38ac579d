pub mod comment;
pub mod localization;
pub mod media;
pub mod post;
pub mod reaction;
pub mod specialization;

pub use comment::*;
pub use localization::*;
pub use media::*;
pub use post::*;
pub use reaction::*;
pub use specialization::*;
