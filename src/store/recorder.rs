use std::borrow::Cow;

use chrono::Utc;

use crate::models::*;

use super::error::{Result, StoreError};
use super::Store;

/// Tracing target for the per-student attendance narration.
pub const ATTENDANCE_LOG_TARGET: &str = "classroll::attendance";

impl Store {
    /// Appends an attendance record and rewrites the backing document.
    ///
    /// An empty presence list is accepted; only missing fields are rejected.
    /// If the rewrite fails the record stays in memory and the error is
    /// returned.
    pub fn record_attendance(&self, input: RecordAttendanceInput) -> Result<AttendanceRecord> {
        let allocation_id = input
            .allocation_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::InvalidInput("`id_alocacao` is required".to_string()))?;
        let entries = input
            .entries
            .ok_or_else(|| StoreError::InvalidInput("`presencas` is required".to_string()))?;

        let mut document = self.lock()?;
        let now = Utc::now();
        let record = AttendanceRecord {
            id: document.next_record_id(now.timestamp_millis()),
            allocation_id,
            class_date: input.class_date,
            period: input.period,
            entries,
            recorded_at: Some(now),
        };

        let appended = document
            .push_attendance(&record)
            .map_err(|e| StoreError::Internal(format!("failed to encode attendance record: {e}")))?;
        if !appended {
            return Err(StoreError::Internal(
                "stored attendance field is not a list".to_string(),
            ));
        }
        narrate(&document, &record);

        if let Err(e) = self.backend.save(&document) {
            tracing::error!(
                record_id = record.id,
                "Attendance kept in memory but not persisted: {}",
                e
            );
            return Err(e);
        }

        tracing::info!(
            record_id = record.id,
            allocation = %record.allocation_id,
            "Attendance recorded"
        );
        Ok(record)
    }
}

fn narrate(document: &Document, record: &AttendanceRecord) {
    let students = document.students(&record.allocation_id);

    tracing::info!(
        target: ATTENDANCE_LOG_TARGET,
        "Attendance for allocation {} on {} ({})",
        record.allocation_id,
        record.class_date.as_deref().unwrap_or("-"),
        record.period.as_deref().unwrap_or("-"),
    );

    for entry in &record.entries {
        let name = students
            .iter()
            .find(|s| s.id.is_some() && s.id == entry.student_id)
            .and_then(|s| s.name.as_deref())
            .map(Cow::Borrowed)
            .unwrap_or_else(|| match &entry.student_id {
                Some(id) => Cow::Owned(format!("Aluno {id}")),
                None => Cow::Borrowed("Aluno sem id"),
            });
        let status = if entry.present { "present" } else { "absent" };

        tracing::info!(target: ATTENDANCE_LOG_TARGET, "  {}: {}", name, status);
    }

    tracing::info!(
        target: ATTENDANCE_LOG_TARGET,
        "Total: {} present, {} absent",
        record.present_count(),
        record.absent_count(),
    );
}
