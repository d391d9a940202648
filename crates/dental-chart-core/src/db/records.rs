//! Patient chart record operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, ChartMap, LoadedChart, PatientRecord, TimelineItem};
use crate::session::{ChartStore, StoreError, StoreResult};

impl Database {
    /// Insert or replace a full record, as received on a reload from the
    /// server.
    pub fn import_record(&self, record: &PatientRecord, appointments: &[Appointment]) -> DbResult<()> {
        let chart_json = record.dental_chart.to_canonical_json()?;
        let revision = record.dental_chart.revision()?;
        let plan_json = serde_json::to_string(&record.treatment_plan)?;
        let notes_json = serde_json::to_string(&record.tooth_notes)?;
        let appointments_json = serde_json::to_string(appointments)?;

        self.conn.execute(
            r#"
            INSERT INTO patient_records (
                patient_id, dental_chart, treatment_plan, tooth_notes,
                appointments, chart_revision, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(patient_id) DO UPDATE SET
                dental_chart = excluded.dental_chart,
                treatment_plan = excluded.treatment_plan,
                tooth_notes = excluded.tooth_notes,
                appointments = excluded.appointments,
                chart_revision = excluded.chart_revision,
                updated_at = excluded.updated_at
            "#,
            params![
                record.patient_id,
                chart_json,
                plan_json,
                notes_json,
                appointments_json,
                revision,
                record.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a record and its appointments.
    pub fn get_record(&self, patient_id: &str) -> DbResult<Option<LoadedChart>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT dental_chart, treatment_plan, tooth_notes, appointments, updated_at
                FROM patient_records
                WHERE patient_id = ?
                "#,
                [patient_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((chart_json, plan_json, notes_json, appointments_json, updated_at)) = row else {
            return Ok(None);
        };

        Ok(Some(LoadedChart {
            record: PatientRecord {
                patient_id: patient_id.to_string(),
                dental_chart: serde_json::from_str(&chart_json)?,
                treatment_plan: serde_json::from_str(&plan_json)?,
                tooth_notes: serde_json::from_str(&notes_json)?,
                updated_at,
            },
            appointments: serde_json::from_str(&appointments_json)?,
        }))
    }

    /// Revision of the stored chart.
    pub fn get_chart_revision(&self, patient_id: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT chart_revision FROM patient_records WHERE patient_id = ?",
                [patient_id],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()
            .map(Option::flatten)
            .map_err(Into::into)
    }

    /// Replace a patient's chart map.
    pub fn update_chart(&self, patient_id: &str, chart: &ChartMap) -> DbResult<bool> {
        let chart_json = chart.to_canonical_json()?;
        let revision = chart.revision()?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patient_records SET
                dental_chart = ?2,
                chart_revision = ?3,
                updated_at = datetime('now')
            WHERE patient_id = ?1
            "#,
            params![patient_id, chart_json, revision],
        )?;
        Ok(rows_affected > 0)
    }

    /// Replace a patient's treatment plan.
    pub fn update_plan(&self, patient_id: &str, plan: &[TimelineItem]) -> DbResult<bool> {
        let plan_json = serde_json::to_string(plan)?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patient_records SET
                treatment_plan = ?2,
                updated_at = datetime('now')
            WHERE patient_id = ?1
            "#,
            params![patient_id, plan_json],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a cached record.
    pub fn delete_record(&self, patient_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patient_records WHERE patient_id = ?", [patient_id])?;
        Ok(rows_affected > 0)
    }

    /// List all cached patient IDs.
    pub fn list_record_ids(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT patient_id FROM patient_records ORDER BY patient_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(id) => StoreError::NotFound(id),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl ChartStore for Database {
    fn load_chart(&self, patient_id: &str) -> StoreResult<LoadedChart> {
        self.get_record(patient_id)?
            .ok_or_else(|| StoreError::NotFound(patient_id.to_string()))
    }

    fn save_chart(&self, patient_id: &str, chart: &ChartMap) -> StoreResult<()> {
        if self.update_chart(patient_id, chart)? {
            Ok(())
        } else {
            Err(DbError::NotFound(patient_id.to_string()).into())
        }
    }

    fn save_plan(&self, patient_id: &str, plan: &[TimelineItem]) -> StoreResult<()> {
        if self.update_plan(patient_id, plan)? {
            Ok(())
        } else {
            Err(DbError::NotFound(patient_id.to_string()).into())
        }
    }
}
