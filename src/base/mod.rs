//! Foundation types for the valence toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`NodeId`], [`SymbolId`] - Arena and file handles
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Domain constants (file extensions, scan batch size, lookup limits)
//!
//! This module has NO dependencies on other valence modules.

pub mod constants;
mod ids;
mod span;

pub use ids::{FileId, NodeId, SymbolId};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
