//! Worker attendance records

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::validate::required_text;
use super::{null_as_default, ItemId};
use crate::error::Result;
use crate::sync::{Messages, Resource, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub worker_name: String,
    /// `YYYY-MM-DD`, set by the server when the record is created.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attendance_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

impl AttendanceRecord {
    pub fn display_name(&self) -> &str {
        if self.worker_name.trim().is_empty() {
            "Unknown Worker"
        } else {
            &self.worker_name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceForm {
    pub worker_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceDraft {
    pub worker_name: String,
}

/// `/attendance`
#[derive(Debug, Clone, Copy)]
pub struct Attendance;

impl Resource for Attendance {
    type Item = AttendanceRecord;
    type Form = AttendanceForm;
    type Draft = AttendanceDraft;
    type Patch = Infallible;

    const COLLECTION: &'static str = "attendance";
    const MESSAGES: Messages = Messages {
        fetch_failed: "Failed to fetch attendance data",
        create_succeeded: "Attendance added successfully",
        create_failed: "Failed to add worker",
        delete_succeeded: "Worker removed successfully",
        delete_failed: "Failed to delete worker",
        update_succeeded: "Attendance updated successfully",
        update_failed: "Failed to update attendance",
    };

    fn item_id(item: &Self::Item) -> &ItemId {
        &item.id
    }

    fn validate(form: &Self::Form) -> Result<Self::Draft> {
        Ok(AttendanceDraft {
            worker_name: required_text("worker_name", &form.worker_name, "Please enter a worker name")?,
        })
    }

    fn matches(item: &Self::Item, query: &SearchQuery) -> bool {
        query.matches_text(&item.worker_name)
    }
}

/// Days on record for `worker`, compared case-insensitively.
pub fn working_days(records: &[AttendanceRecord], worker: &str) -> usize {
    let worker = worker.trim().to_lowercase();
    if worker.is_empty() {
        return 0;
    }
    records
        .iter()
        .filter(|record| record.worker_name.trim().to_lowercase() == worker)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, worker_name: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: ItemId::Int(id),
            worker_name: worker_name.to_string(),
            attendance_date: "2024-06-01".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn decodes_null_fields_as_empty() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"id": 1, "worker_name": null, "attendance_date": "2024-06-01", "notes": null}"#,
        )
        .unwrap();
        assert_eq!(record.worker_name, "");
        assert_eq!(record.display_name(), "Unknown Worker");
    }

    #[test]
    fn validate_requires_worker_name() {
        let error = Attendance::validate(&AttendanceForm {
            worker_name: "  ".to_string(),
        })
        .unwrap_err();
        assert_eq!(error.to_string(), "Please enter a worker name");
    }

    #[test]
    fn working_days_counts_case_insensitively() {
        let records = vec![record(1, "Ravi"), record(2, "ravi"), record(3, "Meena")];
        assert_eq!(working_days(&records, "RAVI"), 2);
        assert_eq!(working_days(&records, "Meena"), 1);
        assert_eq!(working_days(&records, ""), 0);
    }

    #[test]
    fn matches_worker_name() {
        let query = SearchQuery::parse("av").unwrap();
        assert!(Attendance::matches(&record(1, "Ravi"), &query));
        assert!(!Attendance::matches(&record(2, "Meena"), &query));
    }
}
