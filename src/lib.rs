//! Narrowing Patcher: regex rewrites for a generated TSX component
//!
//! Applies a fixed, ordered list of pattern-and-replacement rules to one
//! source file so that reads of variant-only fields on a discriminated union
//! are guarded by a `type` check and an explicit cast.
//!
//! # Architecture
//!
//! - [`RewriteRule`]: a literal pattern/replacement pair
//! - [`RuleSet`]: compiled rules applied in sequence, each over the output
//!   of the previous one
//! - [`Patcher`]: reads the file, runs the rule set, overwrites the file
//!
//! Rules that match nothing are reported, never treated as failures.
//!
//! # Example
//!
//! ```no_run
//! use narrowing_patcher::{catalog, Patcher};
//!
//! let patcher = Patcher::new()?;
//! let report = patcher.run(catalog::DEFAULT_TARGET)?;
//! for outcome in &report.outcomes {
//!     println!("{outcome}");
//! }
//! # Ok::<(), narrowing_patcher::PatchError>(())
//! ```

pub mod catalog;
pub mod errors;
pub mod patcher;
pub mod rewrite;
pub mod rule;

// Re-exports
pub use errors::PatchError;
pub use patcher::{PatchReport, Patcher};
pub use rewrite::{Rewritten, RuleSet};
pub use rule::{CompiledRule, RewriteRule, RuleOutcome};
