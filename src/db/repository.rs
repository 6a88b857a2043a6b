use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::{Diagnosis, DiagnosisSymptomLink, Snapshot, Symptom};

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

fn diagnosis_exists(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM diagnoses WHERE id = ?1)",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn symptom_exists(conn: &Connection, id: &Uuid) -> Result<bool, DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM symptoms WHERE id = ?1)",
        params![id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ═══════════════════════════════════════════
// Symptom Repository
// ═══════════════════════════════════════════

pub fn insert_symptom(conn: &Connection, symptom: &Symptom) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO symptoms (id, name, description) VALUES (?1, ?2, ?3)",
        params![symptom.id.to_string(), symptom.name, symptom.description],
    )?;
    Ok(())
}

pub fn get_symptom(conn: &Connection, id: &Uuid) -> Result<Option<Symptom>, DatabaseError> {
    let row: Option<(String, String, Option<String>)> = conn
        .query_row(
            "SELECT id, name, description FROM symptoms WHERE id = ?1",
            params![id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    match row {
        Some((id, name, description)) => Ok(Some(Symptom {
            id: parse_uuid(&id)?,
            name,
            description,
        })),
        None => Ok(None),
    }
}

/// List the symptom universe, name-ordered for display.
pub fn list_symptoms(conn: &Connection) -> Result<Vec<Symptom>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, description FROM symptoms ORDER BY name, id")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut symptoms = Vec::new();
    for row in rows {
        let (id, name, description) = row?;
        symptoms.push(Symptom {
            id: parse_uuid(&id)?,
            name,
            description,
        });
    }
    Ok(symptoms)
}

pub fn update_symptom(conn: &Connection, symptom: &Symptom) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE symptoms SET name = ?2, description = ?3 WHERE id = ?1",
        params![symptom.id.to_string(), symptom.name, symptom.description],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "symptom".into(),
            id: symptom.id.to_string(),
        });
    }
    Ok(())
}

/// Delete a symptom. Links referencing it are removed by cascade.
pub fn delete_symptom(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM symptoms WHERE id = ?1",
        params![id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "symptom".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Diagnosis Repository
// ═══════════════════════════════════════════

pub fn insert_diagnosis(conn: &Connection, diagnosis: &Diagnosis) -> Result<(), DatabaseError> {
    if diagnosis.parents.contains(&diagnosis.id) {
        return Err(DatabaseError::ConstraintViolation(
            "a diagnosis cannot be its own parent".into(),
        ));
    }

    conn.execute(
        "INSERT INTO diagnoses (id, name, icd_code, description) VALUES (?1, ?2, ?3, ?4)",
        params![
            diagnosis.id.to_string(),
            diagnosis.name,
            diagnosis.icd_code,
            diagnosis.description,
        ],
    )?;

    for (position, parent_id) in diagnosis.parents.iter().enumerate() {
        conn.execute(
            "INSERT INTO diagnosis_parents (diagnosis_id, parent_id, position) VALUES (?1, ?2, ?3)",
            params![
                diagnosis.id.to_string(),
                parent_id.to_string(),
                position as i64,
            ],
        )?;
    }

    for link in &diagnosis.symptoms {
        conn.execute(
            "INSERT INTO diagnosis_symptoms (diagnosis_id, symptom_id, point, hidden)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                diagnosis.id.to_string(),
                link.symptom_id.to_string(),
                link.point,
                link.hidden as i32,
            ],
        )?;
    }

    Ok(())
}

fn load_parents(conn: &Connection, id: &Uuid) -> Result<Vec<Uuid>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT parent_id FROM diagnosis_parents WHERE diagnosis_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![id.to_string()], |row| row.get::<_, String>(0))?;

    let mut parents = Vec::new();
    for row in rows {
        parents.push(parse_uuid(&row?)?);
    }
    Ok(parents)
}

fn load_symptom_links(
    conn: &Connection,
    id: &Uuid,
) -> Result<Vec<DiagnosisSymptomLink>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT symptom_id, point, hidden FROM diagnosis_symptoms
         WHERE diagnosis_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, i32>(1)?,
            row.get::<_, i32>(2)?,
        ))
    })?;

    let mut links = Vec::new();
    for row in rows {
        let (symptom_id, point, hidden) = row?;
        links.push(DiagnosisSymptomLink {
            symptom_id: parse_uuid(&symptom_id)?,
            point,
            hidden: hidden != 0,
        });
    }
    Ok(links)
}

pub fn get_diagnosis(conn: &Connection, id: &Uuid) -> Result<Option<Diagnosis>, DatabaseError> {
    let row: Option<(String, String, String, String)> = conn
        .query_row(
            "SELECT id, name, icd_code, description FROM diagnoses WHERE id = ?1",
            params![id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .optional()?;

    match row {
        Some((id, name, icd_code, description)) => {
            let id = parse_uuid(&id)?;
            Ok(Some(Diagnosis {
                id,
                name,
                icd_code,
                description,
                parents: load_parents(conn, &id)?,
                symptoms: load_symptom_links(conn, &id)?,
            }))
        }
        None => Ok(None),
    }
}

/// List all diagnoses with their parent and symptom links aggregated,
/// ICD-code-ordered.
pub fn list_diagnoses(conn: &Connection) -> Result<Vec<Diagnosis>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, name, icd_code, description FROM diagnoses ORDER BY icd_code, id")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut diagnoses = Vec::new();
    for row in rows {
        let (id, name, icd_code, description) = row?;
        let id = parse_uuid(&id)?;
        diagnoses.push(Diagnosis {
            id,
            name,
            icd_code,
            description,
            parents: load_parents(conn, &id)?,
            symptoms: load_symptom_links(conn, &id)?,
        });
    }
    Ok(diagnoses)
}

/// Update a diagnosis's descriptive fields. Parent and symptom links are
/// mutated through their own operations.
pub fn update_diagnosis(
    conn: &Connection,
    id: &Uuid,
    name: &str,
    icd_code: &str,
    description: &str,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE diagnoses SET name = ?2, icd_code = ?3, description = ?4 WHERE id = ?1",
        params![id.to_string(), name, icd_code, description],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "diagnosis".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Delete a diagnosis. Its junction rows are removed by cascade; parent rows
/// in *other* diagnoses that reference it are left dangling on purpose — the
/// resolver treats them as empty contributions.
pub fn delete_diagnosis(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM diagnoses WHERE id = ?1",
        params![id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "diagnosis".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Parent links
// ═══════════════════════════════════════════

pub fn add_parent(
    conn: &Connection,
    diagnosis_id: &Uuid,
    parent_id: &Uuid,
) -> Result<(), DatabaseError> {
    if diagnosis_id == parent_id {
        return Err(DatabaseError::ConstraintViolation(
            "a diagnosis cannot be its own parent".into(),
        ));
    }
    if !diagnosis_exists(conn, diagnosis_id)? {
        return Err(DatabaseError::NotFound {
            entity_type: "diagnosis".into(),
            id: diagnosis_id.to_string(),
        });
    }
    if !diagnosis_exists(conn, parent_id)? {
        return Err(DatabaseError::NotFound {
            entity_type: "diagnosis".into(),
            id: parent_id.to_string(),
        });
    }

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO diagnosis_parents (diagnosis_id, parent_id, position)
         SELECT ?1, ?2, COALESCE(MAX(position) + 1, 0)
         FROM diagnosis_parents WHERE diagnosis_id = ?1",
        params![diagnosis_id.to_string(), parent_id.to_string()],
    )?;
    if inserted == 0 {
        return Err(DatabaseError::ConstraintViolation(
            "parent link already exists".into(),
        ));
    }
    Ok(())
}

pub fn remove_parent(
    conn: &Connection,
    diagnosis_id: &Uuid,
    parent_id: &Uuid,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM diagnosis_parents WHERE diagnosis_id = ?1 AND parent_id = ?2",
        params![diagnosis_id.to_string(), parent_id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "parent link".into(),
            id: format!("{diagnosis_id} -> {parent_id}"),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Symptom links
// ═══════════════════════════════════════════

pub fn add_symptom_link(
    conn: &Connection,
    diagnosis_id: &Uuid,
    link: &DiagnosisSymptomLink,
) -> Result<(), DatabaseError> {
    if !diagnosis_exists(conn, diagnosis_id)? {
        return Err(DatabaseError::NotFound {
            entity_type: "diagnosis".into(),
            id: diagnosis_id.to_string(),
        });
    }
    if !symptom_exists(conn, &link.symptom_id)? {
        return Err(DatabaseError::NotFound {
            entity_type: "symptom".into(),
            id: link.symptom_id.to_string(),
        });
    }

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO diagnosis_symptoms (diagnosis_id, symptom_id, point, hidden)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            diagnosis_id.to_string(),
            link.symptom_id.to_string(),
            link.point,
            link.hidden as i32,
        ],
    )?;
    if inserted == 0 {
        return Err(DatabaseError::ConstraintViolation(
            "symptom link already exists".into(),
        ));
    }
    Ok(())
}

pub fn update_symptom_link_point(
    conn: &Connection,
    diagnosis_id: &Uuid,
    symptom_id: &Uuid,
    point: i32,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE diagnosis_symptoms SET point = ?3 WHERE diagnosis_id = ?1 AND symptom_id = ?2",
        params![diagnosis_id.to_string(), symptom_id.to_string(), point],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "symptom link".into(),
            id: format!("{diagnosis_id} -> {symptom_id}"),
        });
    }
    Ok(())
}

/// Flip a link's `hidden` flag (the eye toggle).
pub fn toggle_symptom_hidden(
    conn: &Connection,
    diagnosis_id: &Uuid,
    symptom_id: &Uuid,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE diagnosis_symptoms SET hidden = 1 - hidden
         WHERE diagnosis_id = ?1 AND symptom_id = ?2",
        params![diagnosis_id.to_string(), symptom_id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "symptom link".into(),
            id: format!("{diagnosis_id} -> {symptom_id}"),
        });
    }
    Ok(())
}

pub fn remove_symptom_link(
    conn: &Connection,
    diagnosis_id: &Uuid,
    symptom_id: &Uuid,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM diagnosis_symptoms WHERE diagnosis_id = ?1 AND symptom_id = ?2",
        params![diagnosis_id.to_string(), symptom_id.to_string()],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "symptom link".into(),
            id: format!("{diagnosis_id} -> {symptom_id}"),
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Read snapshot
// ═══════════════════════════════════════════

/// Load the read snapshot the matching engine operates on.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot, DatabaseError> {
    Ok(Snapshot {
        diagnoses: list_diagnoses(conn)?,
        symptoms: list_symptoms(conn)?,
    })
}
