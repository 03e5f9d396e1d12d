//! IDE features: the consumer API an editor integration talks to.
//!
//! This module provides the interface between the semantic model (HIR)
//! and an editor. Each free function corresponds to an editor request.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: every query runs against an [`Analysis`] borrowed from
//!    the [`AnalysisHost`], so results can never outlive the trees they
//!    point into
//! 2. **No protocol types**: uses our own types, converted at the boundary
//! 3. **Best effort**: queries work mid-scan and return what is known
//!
//! ## Usage
//!
//! ```ignore
//! use valence::ide::{AnalysisHost, completions, goto_definition};
//!
//! let mut host = AnalysisHost::new(Arc::new(StaticBuildConfig::new()));
//! host.update(path, text)?;
//! host.run_to_completion();
//!
//! let analysis = host.analysis(path).unwrap();
//! let target = goto_definition(&analysis, text, offset);
//! let items = completions(&analysis, text, offset);
//! ```

mod analysis;
mod completion;
mod goto;
mod text_utils;

pub use analysis::{Analysis, AnalysisHost, SharedAnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use goto::{GotoTarget, goto_definition};
pub use text_utils::{compound_name_at, compound_name_before, is_preceded_by_new};
