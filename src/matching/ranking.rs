//! Coverage scoring and deterministic ranking of diagnoses.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{Diagnosis, DiagnosisSymptomLink};
use crate::session::Session;

use super::hierarchy::effective_symptoms;

/// Coverage of a diagnosis's effective symptom set by the current selection,
/// as shown in the table's "matched / total (percent)" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub matched: usize,
    pub total: usize,
}

impl MatchScore {
    /// Coverage ratio in [0, 1]. A diagnosis with zero effective symptoms
    /// scores 0 — defined, not an error.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    /// Rounded whole-number percentage for display.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }
}

/// Score an already-resolved effective symptom set against the selection.
///
/// This is a pure coverage ratio; `point` weights do not enter into it.
pub fn score(effective: &[DiagnosisSymptomLink], session: &Session) -> MatchScore {
    let matched = effective
        .iter()
        .filter(|link| session.is_selected(link.symptom_id))
        .count();
    MatchScore {
        matched,
        total: effective.len(),
    }
}

/// A diagnosis with its resolved effective links and score, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct RankedDiagnosis {
    pub diagnosis: Diagnosis,
    pub effective: Vec<DiagnosisSymptomLink>,
    pub score: MatchScore,
}

/// Resolve, score and sort the full diagnosis collection.
///
/// Order: coverage ratio descending, then `icd_code` ascending (ordinal
/// lexicographic) — a total, deterministic order. Diagnoses with nothing
/// selected all score 0 and fall to the bottom in ICD order.
pub fn rank(all_diagnoses: &[Diagnosis], session: &Session) -> Vec<RankedDiagnosis> {
    let mut ranked: Vec<RankedDiagnosis> = all_diagnoses
        .iter()
        .map(|d| {
            let effective = effective_symptoms(d, all_diagnoses);
            let score = score(&effective, session);
            RankedDiagnosis {
                diagnosis: d.clone(),
                effective,
                score,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .ratio()
            .partial_cmp(&a.score.ratio())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.diagnosis.icd_code.cmp(&b.diagnosis.icd_code))
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn link(symptom: u128) -> DiagnosisSymptomLink {
        DiagnosisSymptomLink {
            symptom_id: uid(symptom),
            point: 1,
            hidden: false,
        }
    }

    fn diagnosis(id: u128, icd_code: &str, links: Vec<DiagnosisSymptomLink>) -> Diagnosis {
        Diagnosis {
            id: uid(id),
            name: format!("d{id}"),
            icd_code: icd_code.into(),
            description: String::new(),
            parents: Vec::new(),
            symptoms: links,
        }
    }

    fn select(ids: &[u128]) -> Session {
        let mut session = Session::new();
        for id in ids {
            session.toggle(uid(*id));
        }
        session
    }

    #[test]
    fn empty_effective_set_scores_zero() {
        let session = select(&[10, 11]);
        let s = score(&[], &session);
        assert_eq!(s, MatchScore { matched: 0, total: 0 });
        assert_eq!(s.ratio(), 0.0);
        assert_eq!(s.percent(), 0);
    }

    #[test]
    fn half_coverage() {
        let effective = vec![link(10), link(11)];
        let s = score(&effective, &select(&[10]));
        assert_eq!(s, MatchScore { matched: 1, total: 2 });
        assert_eq!(s.ratio(), 0.5);
        assert_eq!(s.percent(), 50);
    }

    #[test]
    fn percent_rounds() {
        let s = MatchScore { matched: 1, total: 3 };
        assert_eq!(s.percent(), 33);
        let s = MatchScore { matched: 2, total: 3 };
        assert_eq!(s.percent(), 67);
    }

    #[test]
    fn unrelated_selection_does_not_change_score() {
        let effective = vec![link(10), link(11)];
        let base = score(&effective, &select(&[10]));
        let with_noise = score(&effective, &select(&[10, 99]));
        assert_eq!(base, with_noise);
    }

    #[test]
    fn score_monotone_in_matching_selection() {
        let effective = vec![link(10), link(11), link(12)];
        let mut session = Session::new();
        let mut last = score(&effective, &session).ratio();
        for id in [10, 11, 12] {
            session.toggle(uid(id));
            let next = score(&effective, &session).ratio();
            assert!(next >= last);
            last = next;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn rank_orders_by_coverage_desc() {
        let all = vec![
            diagnosis(1, "B01", vec![link(10), link(11)]),
            diagnosis(2, "A01", vec![link(10)]),
        ];
        let ranked = rank(&all, &select(&[10]));
        // 1/1 beats 1/2.
        assert_eq!(ranked[0].diagnosis.id, uid(2));
        assert_eq!(ranked[1].diagnosis.id, uid(1));
    }

    #[test]
    fn ties_break_on_icd_code_ascending() {
        let all = vec![
            diagnosis(1, "C03", vec![link(10)]),
            diagnosis(2, "A01", vec![link(11)]),
            diagnosis(3, "B02", vec![link(12)]),
        ];
        let ranked = rank(&all, &Session::new());
        let codes: Vec<&str> = ranked
            .iter()
            .map(|r| r.diagnosis.icd_code.as_str())
            .collect();
        assert_eq!(codes, vec!["A01", "B02", "C03"]);
    }

    #[test]
    fn unselected_diagnoses_fall_to_bottom() {
        let all = vec![
            diagnosis(1, "A01", vec![link(10)]),
            diagnosis(2, "B01", vec![link(20)]),
        ];
        let ranked = rank(&all, &select(&[20]));
        assert_eq!(ranked[0].diagnosis.id, uid(2));
        assert_eq!(ranked[1].score.matched, 0);
    }

    #[test]
    fn ranked_diagnosis_serializes_for_ipc() {
        let all = vec![diagnosis(1, "A01", vec![link(10)])];
        let ranked = rank(&all, &select(&[10]));
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["score"]["matched"], 1);
        assert_eq!(json["score"]["total"], 1);
        assert_eq!(json["diagnosis"]["icd_code"], "A01");
    }

    #[test]
    fn rank_resolves_inherited_links() {
        let parent = diagnosis(2, "A00", vec![link(20)]);
        let mut child = diagnosis(1, "J18", vec![link(10)]);
        child.parents = vec![uid(2)];
        let all = vec![child, parent];

        let ranked = rank(&all, &select(&[20]));
        let child_entry = ranked
            .iter()
            .find(|r| r.diagnosis.id == uid(1))
            .unwrap();
        assert_eq!(child_entry.effective.len(), 2);
        assert_eq!(child_entry.score, MatchScore { matched: 1, total: 2 });
    }
}
