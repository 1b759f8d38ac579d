//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::common::{AccountId, PostId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let account_id: AccountId = AccountId::from_i64(7);
//! let post_id: PostId = PostId::from_i64(7);
//!
//! // This would be a compile error:
//! // let wrong: PostId = account_id;
//! ```

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Account entities (post authors and follow participants).
pub struct Account;

/// Marker type for Post entities (base posts of every publication kind).
pub struct Post;

/// Marker type for Comment entities (threaded comments on posts).
pub struct Comment;

/// Marker type for PostType registry entries.
pub struct PostType;

/// Marker type for Language registry entries.
pub struct Language;

/// Marker type for Media entities (ordered attachments on posts).
pub struct Media;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Account entities.
pub type AccountId = Id<Account>;

/// Typed ID for Post entities.
pub type PostId = Id<Post>;

/// Typed ID for Comment entities.
pub type CommentId = Id<Comment>;

/// Typed ID for PostType registry entries.
pub type PostTypeId = Id<PostType>;

/// Typed ID for Language registry entries.
pub type LanguageId = Id<Language>;

/// Typed ID for Media entities.
pub type MediaId = Id<Media>;
