//! Formatted document model and placeholder reinsertion.
//!
//! HTML formatters print into an intermediate document of strings, arrays
//! and layout commands before rendering it to text. [`Doc`] models that
//! document; [`Reinserter`] walks it after printing and swaps placeholder
//! keys back for the template tags they stand in for.

pub mod builders;
pub mod tree;
pub mod walker;

pub use tree::{Command, CommandKind, Doc, DocRef, leaves};
pub use walker::{ReinsertStats, Reinserter, reinsert};
