//! Sub-path deployment support: base-path injection into build configs and
//! post-build output fixes.

mod output;
mod patcher;
mod strategy;

pub use output::{
    EnsureOutcome, FinalizeError, FinalizeReport, OutputFinalizer, FALLBACK_DOCUMENT, NOJEKYLL,
    PRIMARY_DOCUMENT,
};
pub use patcher::{ConfigPatcher, PatchError, PatchOutcome, PatchTarget};
pub use strategy::{ConfigOption, InsertionStrategy, PatchFamily, StrategyError, TextPatch};
