pub mod diagnosis;
pub mod symptom;

pub use diagnosis::*;
pub use symptom::*;

use serde::{Deserialize, Serialize};

/// The read interface's unit: the current stored collections as one
/// consistent view. The matching engine only ever sees snapshots — it never
/// mutates stored records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub diagnoses: Vec<Diagnosis>,
    pub symptoms: Vec<Symptom>,
}
