//! Process-local selection state for an interactive narrowing session.
//!
//! The original selection lives in UI state: a set of picked symptom ids plus
//! the global "should hide" preference. Neither is persisted; the embedding
//! application creates a `Session` at session start, passes it into the
//! matching engine, and discards it at session end.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::Symptom;

/// Selected symptom ids and the should-hide preference.
///
/// Membership is the only observable property of the selection — there is no
/// ordering. The only mutations are `toggle` and `set_should_hide`; both are
/// single-step, so no transaction discipline is needed.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: HashSet<Uuid>,
    should_hide: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a symptom id's membership in the selection.
    ///
    /// Adds the id if absent, removes it if present; two identical toggles
    /// cancel out. Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected(&self) -> &HashSet<Uuid> {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn should_hide(&self) -> bool {
        self.should_hide
    }

    pub fn set_should_hide(&mut self, should_hide: bool) {
        self.should_hide = should_hide;
    }
}

/// Split the symptom universe into (selected, unselected) for the picker's
/// two columns.
pub fn partition_symptoms<'a>(
    symptoms: &'a [Symptom],
    session: &Session,
) -> (Vec<&'a Symptom>, Vec<&'a Symptom>) {
    symptoms.iter().partition(|s| session.is_selected(s.id))
}
