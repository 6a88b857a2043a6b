//! Effective-symptom-set resolution across the diagnosis parent hierarchy.
//!
//! A diagnosis inherits the symptom links of all its ancestors. Parents are
//! weak id references resolved against the snapshot, so the walk keeps an
//! explicit visited set: cycles terminate and a diagnosis reached through two
//! ancestor paths (diamond) is expanded exactly once.

use std::collections::{HashMap, HashSet, VecDeque};

use uuid::Uuid;

use crate::models::{Diagnosis, DiagnosisSymptomLink};

/// Resolve a diagnosis's effective symptom set: its own links unioned with
/// those inherited transitively from every ancestor, deduplicated by
/// `symptom_id`.
///
/// Duplicate policy: the diagnosis's own link always wins over an inherited
/// one; between ancestors, the first link encountered wins, with parents
/// explored breadth-first in declaration order. A parent id absent from
/// `all_diagnoses` contributes nothing.
///
/// Pure and deterministic for a fixed input; the output always contains the
/// diagnosis's own links.
pub fn effective_symptoms(
    diagnosis: &Diagnosis,
    all_diagnoses: &[Diagnosis],
) -> Vec<DiagnosisSymptomLink> {
    let by_id: HashMap<Uuid, &Diagnosis> = all_diagnoses.iter().map(|d| (d.id, d)).collect();

    let mut seen_symptoms: HashSet<Uuid> = HashSet::new();
    let mut effective: Vec<DiagnosisSymptomLink> = Vec::new();
    let mut visited: HashSet<Uuid> = HashSet::from([diagnosis.id]);
    let mut queue: VecDeque<Uuid> = diagnosis.parents.iter().copied().collect();

    // Own links first, so they beat any inherited link for the same symptom.
    for link in &diagnosis.symptoms {
        if seen_symptoms.insert(link.symptom_id) {
            effective.push(link.clone());
        }
    }

    while let Some(parent_id) = queue.pop_front() {
        if !visited.insert(parent_id) {
            continue;
        }
        let Some(parent) = by_id.get(&parent_id) else {
            tracing::warn!(parent_id = %parent_id, "dangling parent reference in snapshot");
            continue;
        };
        for link in &parent.symptoms {
            if seen_symptoms.insert(link.symptom_id) {
                effective.push(link.clone());
            }
        }
        queue.extend(parent.parents.iter().copied());
    }

    effective
}

/// The symptom identities of a resolved link set.
pub fn symptom_ids(links: &[DiagnosisSymptomLink]) -> HashSet<Uuid> {
    links.iter().map(|link| link.symptom_id).collect()
}
