//! The diagnosis–symptom matching engine.
//!
//! Resolves each diagnosis's effective symptom set across its parent
//! hierarchy, scores and ranks the collection against the selected symptoms,
//! surfaces excess (contradicting) selections, and classifies symptom tags
//! for rendering. Every function here is pure over a store snapshot plus the
//! session — safe to evaluate for different diagnoses in parallel, nothing to
//! lock.

mod excess;
mod hierarchy;
mod ranking;
mod tags;

pub use excess::*;
pub use hierarchy::*;
pub use ranking::*;
pub use tags::*;

// ── Tests ──────────────────────────────────────────────────────────────────
