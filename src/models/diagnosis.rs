use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Association between a diagnosis and a symptom.
///
/// `symptom_id` is a weak reference — the link never owns the symptom.
/// A negative `point` marks the symptom as evidence *against* the diagnosis
/// even though it is formally associated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisSymptomLink {
    pub symptom_id: Uuid,
    pub point: i32,
    /// When true and the global should-hide preference is active, the
    /// symptom's own tag is collapsed in presentation. It still counts in
    /// scoring.
    pub hidden: bool,
}

/// A candidate medical condition.
///
/// `parents` are weak references to other diagnoses, resolved at read time
/// against the full collection; a parent id that is no longer present
/// contributes nothing. The parent graph may contain cycles and shared
/// ancestors. `icd_code` is used for display and ranking tie-breaks only,
/// never for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Uuid,
    pub name: String,
    pub icd_code: String,
    pub description: String,
    pub parents: Vec<Uuid>,
    pub symptoms: Vec<DiagnosisSymptomLink>,
}
