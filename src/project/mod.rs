//! Project management: build roots, scans, programs and the registry.
//!
//! ## Architecture
//!
//! ```text
//! BuildConfig (injected)  → BuildRoot per directory
//!     ↓
//! Registry                → one Program per build root
//!     ↓ tick()
//! SourceScan              → list files, parse a batch per tick (rayon)
//!     ↓
//! SourceSet               → queried through hir::Sources
//! ```
//!
//! System declarations are one more scan owned by the registry, started on
//! first demand and shared by every program.

mod build_config;
mod error;
mod file_set;
mod program;
mod registry;
mod scan;
mod system;

pub use build_config::{BuildConfig, BuildRoot, StaticBuildConfig, detect};
pub use error::{LoadError, LoadResult};
pub use file_set::FileSet;
pub use program::Program;
pub use registry::{Registry, ScanOptions};
pub use scan::{
    ScanContext, ScanPhase, ScanTarget, SourceScan, discover_sources, load_source,
};
pub use system::SystemDeclarations;
