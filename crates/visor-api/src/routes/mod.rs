//! # Route Modules
//!
//! Each module exposes `router() -> Router<AppState>`; [`crate::app`]
//! merges them.

pub mod exports;
pub mod map;
pub mod territories;
pub mod viewer;
