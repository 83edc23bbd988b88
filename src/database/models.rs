use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub qr_code: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// One attendance row joined with worker and admin names, as served to the
/// admin review screen and the CSV export.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceEntry {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub worker_username: String,
    pub date: NaiveDate,
    pub period: String,
    pub admin_name: String,
    pub created_at: DateTime<Utc>,
}

/// A worker's own attendance history (no joins needed for self-service view).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkerAttendance {
    pub id: i64,
    pub date: NaiveDate,
    pub period: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub max_participants: i64,
    pub transport_mode: String,
    pub category: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignedWorker {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityChecklist {
    pub id: i64,
    pub activity_id: i64,
    pub worker_id: i64,
    pub departure_check: bool,
    pub return_check: bool,
    pub comments: String,
    pub mood: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Checklist joined with the worker's name for the admin review screen.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistEntry {
    pub id: i64,
    pub activity_id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub departure_check: bool,
    pub return_check: bool,
    pub comments: String,
    pub mood: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Checklist joined with its activity, for the worker's self-service view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkerChecklistEntry {
    pub id: i64,
    pub activity_id: i64,
    pub activity_title: String,
    pub activity_date: NaiveDate,
    pub departure_check: bool,
    pub return_check: bool,
    pub comments: String,
    pub mood: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Insert/update payload for an activity, built by the HTTP handlers.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub max_participants: i64,
    pub transport_mode: String,
    pub category: String,
    pub created_by: i64,
}

/// The two daily half-day slots an attendance scan can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Period::Morning),
            "afternoon" => Some(Period::Afternoon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
        }
    }

    /// Label shown to the admin after a successful scan.
    pub fn label_fr(&self) -> &'static str {
        match self {
            Period::Morning => "matin",
            Period::Afternoon => "après-midi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
}

impl Mood {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "happy" => Some(Mood::Happy),
            "neutral" => Some(Mood::Neutral),
            "sad" => Some(Mood::Sad),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_both_slots() {
        assert_eq!(Period::parse("morning"), Some(Period::Morning));
        assert_eq!(Period::parse("afternoon"), Some(Period::Afternoon));
        assert_eq!(Period::parse("evening"), None);
        assert_eq!(Period::parse(""), None);
    }

    #[test]
    fn period_labels() {
        assert_eq!(Period::Morning.label_fr(), "matin");
        assert_eq!(Period::Afternoon.label_fr(), "après-midi");
    }

    #[test]
    fn mood_round_trips() {
        for mood in [Mood::Happy, Mood::Neutral, Mood::Sad] {
            assert_eq!(Mood::parse(mood.as_str()), Some(mood));
        }
        assert_eq!(Mood::parse("angry"), None);
    }
}
