//! Excess-symptom detection: selected symptoms a diagnosis cannot explain.

use crate::models::{DiagnosisSymptomLink, Symptom};
use crate::session::Session;

use super::hierarchy::symptom_ids;

/// The selected symptoms that are *not* in the diagnosis's effective symptom
/// set — contradicting evidence, rendered as the "not matching" tags.
///
/// Returned in `all_symptoms` order. An empty result is the fully consistent
/// state (the caller renders an affirmative marker instead of tags).
pub fn excess_symptoms(
    effective: &[DiagnosisSymptomLink],
    all_symptoms: &[Symptom],
    session: &Session,
) -> Vec<Symptom> {
    let effective_ids = symptom_ids(effective);
    all_symptoms
        .iter()
        .filter(|s| session.is_selected(s.id) && !effective_ids.contains(&s.id))
        .cloned()
        .collect()
}
