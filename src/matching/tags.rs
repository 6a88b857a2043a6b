//! Symptom tag classification and visibility.
//!
//! A rendered tag is either a bare symptom (an excess tag, or a picker
//! entry) or a symptom together with its diagnosis link. Modeling the pair
//! as one variant type lets the evidence and collapse rules branch on an
//! explicit tag instead of presence checks.

use serde::Serialize;

use crate::models::{DiagnosisSymptomLink, Symptom};
use crate::session::Session;

/// Whether a link's own tag is collapsed under the global preference.
///
/// Collapsing suppresses only the symptom's own tag; descendants of the
/// symptom, if the surrounding model defines any, stay visible. Hidden links
/// still count in scoring.
pub fn is_collapsed(link: &DiagnosisSymptomLink, should_hide: bool) -> bool {
    link.hidden && should_hide
}

/// A symptom as it is about to be rendered.
#[derive(Debug, Clone, Serialize)]
pub enum SymptomTag {
    /// A symptom with no diagnosis association in this context.
    Plain(Symptom),
    /// A symptom belonging (directly or by inheritance) to a diagnosis.
    Associated(Symptom, DiagnosisSymptomLink),
}

impl SymptomTag {
    pub fn symptom(&self) -> &Symptom {
        match self {
            Self::Plain(symptom) => symptom,
            Self::Associated(symptom, _) => symptom,
        }
    }

    pub fn link(&self) -> Option<&DiagnosisSymptomLink> {
        match self {
            Self::Plain(_) => None,
            Self::Associated(_, link) => Some(link),
        }
    }

    /// A negatively weighted link argues against the diagnosis even when its
    /// symptom is selected and effective. Presentation classification only —
    /// it does not change set membership.
    pub fn is_negative_evidence(&self) -> bool {
        match self {
            Self::Plain(_) => false,
            Self::Associated(_, link) => link.point < 0,
        }
    }

    pub fn is_selected(&self, session: &Session) -> bool {
        session.is_selected(self.symptom().id)
    }

    pub fn is_collapsed(&self, session: &Session) -> bool {
        match self {
            Self::Plain(_) => false,
            Self::Associated(_, link) => is_collapsed(link, session.should_hide()),
        }
    }
}

/// Build the renderable tags for a resolved effective link set, name-ordered
/// the way the diagnosis row lists them.
///
/// A link whose symptom record is missing from the universe is skipped — a
/// weak reference that resolves to nothing contributes nothing.
pub fn link_tags(
    effective: &[DiagnosisSymptomLink],
    all_symptoms: &[Symptom],
) -> Vec<SymptomTag> {
    let mut tags: Vec<SymptomTag> = effective
        .iter()
        .filter_map(|link| {
            let symptom = all_symptoms.iter().find(|s| s.id == link.symptom_id);
            if symptom.is_none() {
                tracing::warn!(symptom_id = %link.symptom_id, "dangling symptom reference in link");
            }
            symptom.map(|s| SymptomTag::Associated(s.clone(), link.clone()))
        })
        .collect();
    tags.sort_by(|a, b| a.symptom().name.cmp(&b.symptom().name));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn symptom(name: &str) -> Symptom {
        Symptom {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
        }
    }

    fn link(symptom_id: Uuid, point: i32, hidden: bool) -> DiagnosisSymptomLink {
        DiagnosisSymptomLink {
            symptom_id,
            point,
            hidden,
        }
    }

    #[test]
    fn never_collapsed_without_preference() {
        let s = symptom("fever");
        for hidden in [false, true] {
            assert!(!is_collapsed(&link(s.id, 1, hidden), false));
        }
    }

    #[test]
    fn collapse_follows_hidden_flag_under_preference() {
        let s = symptom("fever");
        assert!(is_collapsed(&link(s.id, 1, true), true));
        assert!(!is_collapsed(&link(s.id, 1, false), true));
    }

    #[test]
    fn plain_tag_is_never_collapsed() {
        let mut session = Session::new();
        session.set_should_hide(true);
        let tag = SymptomTag::Plain(symptom("fever"));
        assert!(!tag.is_collapsed(&session));
    }

    #[test]
    fn negative_point_is_negative_evidence() {
        let s = symptom("fever");
        let tag = SymptomTag::Associated(s.clone(), link(s.id, -2, false));
        assert!(tag.is_negative_evidence());
    }

    #[test]
    fn negative_evidence_even_when_selected() {
        let s = symptom("fever");
        let mut session = Session::new();
        session.toggle(s.id);
        let tag = SymptomTag::Associated(s.clone(), link(s.id, -2, false));
        assert!(tag.is_selected(&session));
        assert!(tag.is_negative_evidence());
    }

    #[test]
    fn plain_tag_is_never_negative_evidence() {
        let tag = SymptomTag::Plain(symptom("fever"));
        assert!(!tag.is_negative_evidence());
    }

    #[test]
    fn link_tags_name_ordered() {
        let fever = symptom("fever");
        let cough = symptom("cough");
        let effective = vec![link(fever.id, 1, false), link(cough.id, 1, false)];
        let all = vec![fever.clone(), cough.clone()];

        let tags = link_tags(&effective, &all);
        let names: Vec<&str> = tags.iter().map(|t| t.symptom().name.as_str()).collect();
        assert_eq!(names, vec!["cough", "fever"]);
    }

    #[test]
    fn link_tags_skip_dangling_symptoms() {
        let fever = symptom("fever");
        let effective = vec![link(fever.id, 1, false), link(Uuid::new_v4(), 1, false)];
        let tags = link_tags(&effective, &[fever]);
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn accessors_expose_symptom_and_link() {
        let s = symptom("fever");
        let l = link(s.id, 3, true);
        let tag = SymptomTag::Associated(s.clone(), l.clone());
        assert_eq!(tag.symptom(), &s);
        assert_eq!(tag.link(), Some(&l));
        assert_eq!(SymptomTag::Plain(s.clone()).link(), None);
    }
}
