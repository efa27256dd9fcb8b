//! Compliance scoring and side-by-side comparison.
//!
//! `score` is a pure function of a label's content: no I/O, no mutation,
//! identical output for identical input. The category rules are the
//! system-wide contract for compliance estimates; they are heuristics, not
//! regulatory advice.
//!
//! # Example
//!
//! ```ignore
//! use labelforge_compliance::score;
//!
//! let estimate = score(&label);
//! println!("overall: {} ({} issues)", estimate.overall, estimate.issues.len());
//! ```

pub mod compare;
pub mod score;

pub use compare::{compare, ComparisonEntry, LabelComparison};
pub use score::score;
