use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An observable clinical sign, identified independently of any diagnosis.
///
/// Immutable once created; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}
