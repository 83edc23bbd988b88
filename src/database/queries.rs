use crate::database::models::{
    Activity, ActivityChecklist, Admin, AssignedWorker, AttendanceEntry, ChecklistEntry, Mood,
    NewActivity, Period, Worker, WorkerAttendance, WorkerChecklistEntry,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

type Result<T> = std::result::Result<T, sqlx::Error>;

// Worker queries

pub async fn create_worker(
    pool: &SqlitePool,
    name: &str,
    qr_code: &str,
    username: &str,
    password: &str,
) -> Result<Worker> {
    let result =
        sqlx::query("INSERT INTO workers (name, qr_code, username, password) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(qr_code)
            .bind(username)
            .bind(password)
            .execute(pool)
            .await?;

    let worker_id = result.last_insert_rowid();
    sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = ?")
        .bind(worker_id)
        .fetch_one(pool)
        .await
}

pub async fn get_all_workers(pool: &SqlitePool) -> Result<Vec<Worker>> {
    sqlx::query_as::<_, Worker>("SELECT * FROM workers ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn get_worker_by_id(pool: &SqlitePool, worker_id: i64) -> Result<Option<Worker>> {
    sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = ?")
        .bind(worker_id)
        .fetch_optional(pool)
        .await
}

/// The scanned QR token is the sole scan-to-identity resolution key.
pub async fn get_worker_by_qr_code(pool: &SqlitePool, qr_code: &str) -> Result<Option<Worker>> {
    sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE qr_code = ?")
        .bind(qr_code)
        .fetch_optional(pool)
        .await
}

pub async fn get_worker_by_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<Worker>> {
    sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE username = ? AND password = ?")
        .bind(username)
        .bind(password)
        .fetch_optional(pool)
        .await
}

// Admin queries

pub async fn get_admin_by_id(pool: &SqlitePool, admin_id: i64) -> Result<Option<Admin>> {
    sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = ?")
        .bind(admin_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_admin_by_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<Admin>> {
    sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = ? AND password = ?")
        .bind(username)
        .bind(password)
        .fetch_optional(pool)
        .await
}

// Attendance queries

/// Inserts one attendance row guarded by UNIQUE(worker_id, date, period).
/// A duplicate scan is silently ignored; returns whether a row was inserted.
pub async fn mark_attendance(
    pool: &SqlitePool,
    worker_id: i64,
    admin_id: i64,
    date: NaiveDate,
    period: Period,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO attendance (worker_id, admin_id, date, period) VALUES (?, ?, ?, ?)",
    )
    .bind(worker_id)
    .bind(admin_id)
    .bind(date)
    .bind(period.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_all_attendance(pool: &SqlitePool) -> Result<Vec<AttendanceEntry>> {
    sqlx::query_as::<_, AttendanceEntry>(
        "SELECT a.id, a.worker_id, w.name AS worker_name, w.username AS worker_username,
                a.date, a.period, adm.name AS admin_name, a.created_at
         FROM attendance a
         JOIN workers w ON a.worker_id = w.id
         JOIN admins adm ON a.admin_id = adm.id
         ORDER BY a.date DESC, w.name, a.period",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_attendance_by_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<AttendanceEntry>> {
    sqlx::query_as::<_, AttendanceEntry>(
        "SELECT a.id, a.worker_id, w.name AS worker_name, w.username AS worker_username,
                a.date, a.period, adm.name AS admin_name, a.created_at
         FROM attendance a
         JOIN workers w ON a.worker_id = w.id
         JOIN admins adm ON a.admin_id = adm.id
         WHERE a.date = ?
         ORDER BY w.name, a.period",
    )
    .bind(date)
    .fetch_all(pool)
    .await
}

pub async fn delete_attendance(pool: &SqlitePool, attendance_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(attendance_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_worker_attendance(
    pool: &SqlitePool,
    worker_id: i64,
) -> Result<Vec<WorkerAttendance>> {
    sqlx::query_as::<_, WorkerAttendance>(
        "SELECT id, date, period, created_at
         FROM attendance
         WHERE worker_id = ?
         ORDER BY date DESC, period",
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await
}

pub async fn get_worker_attendance_count(pool: &SqlitePool, worker_id: i64) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE worker_id = ?")
        .bind(worker_id)
        .fetch_one(pool)
        .await
}

// Activity queries

pub async fn create_activity(pool: &SqlitePool, activity: &NewActivity) -> Result<Activity> {
    let result = sqlx::query(
        "INSERT INTO activities (title, description, location, date, start_time, end_time,
                                 max_participants, transport_mode, category, created_by)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&activity.title)
    .bind(&activity.description)
    .bind(&activity.location)
    .bind(activity.date)
    .bind(&activity.start_time)
    .bind(&activity.end_time)
    .bind(activity.max_participants)
    .bind(&activity.transport_mode)
    .bind(&activity.category)
    .bind(activity.created_by)
    .execute(pool)
    .await?;

    let activity_id = result.last_insert_rowid();
    sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = ?")
        .bind(activity_id)
        .fetch_one(pool)
        .await
}

pub async fn get_all_activities(pool: &SqlitePool) -> Result<Vec<Activity>> {
    sqlx::query_as::<_, Activity>("SELECT * FROM activities ORDER BY date, start_time")
        .fetch_all(pool)
        .await
}

pub async fn get_activity_by_id(pool: &SqlitePool, activity_id: i64) -> Result<Option<Activity>> {
    sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = ?")
        .bind(activity_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_activity(
    pool: &SqlitePool,
    activity_id: i64,
    activity: &NewActivity,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE activities
         SET title = ?, description = ?, location = ?, date = ?, start_time = ?, end_time = ?,
             max_participants = ?, transport_mode = ?, category = ?
         WHERE id = ?",
    )
    .bind(&activity.title)
    .bind(&activity.description)
    .bind(&activity.location)
    .bind(activity.date)
    .bind(&activity.start_time)
    .bind(&activity.end_time)
    .bind(activity.max_participants)
    .bind(&activity.transport_mode)
    .bind(&activity.category)
    .bind(activity_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes an activity together with its assignments and checklists in one
/// transaction, so a partial failure cannot leave orphaned rows.
pub async fn delete_activity(pool: &SqlitePool, activity_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM activity_checklists WHERE activity_id = ?")
        .bind(activity_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM activity_workers WHERE activity_id = ?")
        .bind(activity_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM activities WHERE id = ?")
        .bind(activity_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

// Assignment queries

/// Assigning an already-assigned worker is a no-op, matching the idempotent
/// attendance insert.
pub async fn assign_worker(pool: &SqlitePool, activity_id: i64, worker_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO activity_workers (activity_id, worker_id) VALUES (?, ?)")
        .bind(activity_id)
        .bind(worker_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Removing a pair that was never assigned is a no-op, not an error.
pub async fn unassign_worker(pool: &SqlitePool, activity_id: i64, worker_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM activity_workers WHERE activity_id = ? AND worker_id = ?")
        .bind(activity_id)
        .bind(worker_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn get_activity_workers(
    pool: &SqlitePool,
    activity_id: i64,
) -> Result<Vec<AssignedWorker>> {
    sqlx::query_as::<_, AssignedWorker>(
        "SELECT w.id, w.name, w.username, aw.assigned_at
         FROM activity_workers aw
         JOIN workers w ON aw.worker_id = w.id
         WHERE aw.activity_id = ?
         ORDER BY w.name",
    )
    .bind(activity_id)
    .fetch_all(pool)
    .await
}

pub async fn get_worker_activities(pool: &SqlitePool, worker_id: i64) -> Result<Vec<Activity>> {
    sqlx::query_as::<_, Activity>(
        "SELECT a.*
         FROM activities a
         JOIN activity_workers aw ON aw.activity_id = a.id
         WHERE aw.worker_id = ?
         ORDER BY a.date, a.start_time",
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await
}

// Checklist queries

/// Full replace of the (activity, worker) checklist row, last-write-wins.
pub async fn upsert_checklist(
    pool: &SqlitePool,
    activity_id: i64,
    worker_id: i64,
    departure_check: bool,
    return_check: bool,
    comments: &str,
    mood: Mood,
) -> Result<ActivityChecklist> {
    sqlx::query(
        "INSERT INTO activity_checklists
             (activity_id, worker_id, departure_check, return_check, comments, mood)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(activity_id, worker_id) DO UPDATE SET
             departure_check = excluded.departure_check,
             return_check = excluded.return_check,
             comments = excluded.comments,
             mood = excluded.mood,
             last_updated = CURRENT_TIMESTAMP",
    )
    .bind(activity_id)
    .bind(worker_id)
    .bind(departure_check)
    .bind(return_check)
    .bind(comments)
    .bind(mood.as_str())
    .execute(pool)
    .await?;

    sqlx::query_as::<_, ActivityChecklist>(
        "SELECT * FROM activity_checklists WHERE activity_id = ? AND worker_id = ?",
    )
    .bind(activity_id)
    .bind(worker_id)
    .fetch_one(pool)
    .await
}

/// Absence means "not yet started", distinct from an all-false checklist.
pub async fn get_checklist(
    pool: &SqlitePool,
    activity_id: i64,
    worker_id: i64,
) -> Result<Option<ActivityChecklist>> {
    sqlx::query_as::<_, ActivityChecklist>(
        "SELECT * FROM activity_checklists WHERE activity_id = ? AND worker_id = ?",
    )
    .bind(activity_id)
    .bind(worker_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_activity_checklists(
    pool: &SqlitePool,
    activity_id: i64,
) -> Result<Vec<ChecklistEntry>> {
    sqlx::query_as::<_, ChecklistEntry>(
        "SELECT c.id, c.activity_id, c.worker_id, w.name AS worker_name,
                c.departure_check, c.return_check, c.comments, c.mood, c.last_updated
         FROM activity_checklists c
         JOIN workers w ON c.worker_id = w.id
         WHERE c.activity_id = ?
         ORDER BY w.name",
    )
    .bind(activity_id)
    .fetch_all(pool)
    .await
}

pub async fn get_worker_checklists(
    pool: &SqlitePool,
    worker_id: i64,
) -> Result<Vec<WorkerChecklistEntry>> {
    sqlx::query_as::<_, WorkerChecklistEntry>(
        "SELECT c.id, c.activity_id, a.title AS activity_title, a.date AS activity_date,
                c.departure_check, c.return_check, c.comments, c.mood, c.last_updated
         FROM activity_checklists c
         JOIN activities a ON c.activity_id = a.id
         WHERE c.worker_id = ?
         ORDER BY a.date DESC",
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    async fn seed_worker(pool: &SqlitePool, name: &str) -> Worker {
        let qr = format!("WORKER_{}", uuid::Uuid::new_v4());
        create_worker(pool, name, &qr, &name.to_lowercase(), "secret")
            .await
            .unwrap()
    }

    fn sample_activity(created_by: i64) -> NewActivity {
        NewActivity {
            title: "Sortie piscine".into(),
            description: "".into(),
            location: "Piscine municipale".into(),
            date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            start_time: "09:00".into(),
            end_time: "12:00".into(),
            max_participants: 20,
            transport_mode: "bus".into(),
            category: "sport".into(),
            created_by,
        }
    }

    #[tokio::test]
    async fn attendance_scan_is_idempotent() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Yasmine").await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        let first = mark_attendance(&pool, worker.id, 1, date, Period::Morning)
            .await
            .unwrap();
        let second = mark_attendance(&pool, worker.id, 1, date, Period::Morning)
            .await
            .unwrap();

        assert!(first);
        assert!(!second);

        let rows = get_attendance_by_date(&pool, date).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].worker_name, "Yasmine");
        assert_eq!(rows[0].period, "morning");
    }

    #[tokio::test]
    async fn attendance_unique_per_period_not_per_day() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Karim").await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        assert!(
            mark_attendance(&pool, worker.id, 1, date, Period::Morning)
                .await
                .unwrap()
        );
        assert!(
            mark_attendance(&pool, worker.id, 1, date, Period::Afternoon)
                .await
                .unwrap()
        );

        let count = get_worker_attendance_count(&pool, worker.id).await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn delete_attendance_reports_missing_row() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Nora").await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 11).unwrap();

        mark_attendance(&pool, worker.id, 1, date, Period::Morning)
            .await
            .unwrap();
        let rows = get_worker_attendance(&pool, worker.id).await.unwrap();
        assert_eq!(rows.len(), 1);

        assert!(delete_attendance(&pool, rows[0].id).await.unwrap());
        assert!(!delete_attendance(&pool, rows[0].id).await.unwrap());
    }

    #[tokio::test]
    async fn assign_then_unassign_is_symmetric() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Lina").await;
        let activity = create_activity(&pool, &sample_activity(1)).await.unwrap();

        assign_worker(&pool, activity.id, worker.id).await.unwrap();
        // Duplicate assignment is a no-op.
        assign_worker(&pool, activity.id, worker.id).await.unwrap();

        let assigned = get_activity_workers(&pool, activity.id).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].name, "Lina");

        unassign_worker(&pool, activity.id, worker.id).await.unwrap();
        // Unassigning a missing pair must not fail.
        unassign_worker(&pool, activity.id, worker.id).await.unwrap();

        let assigned = get_activity_workers(&pool, activity.id).await.unwrap();
        assert!(assigned.is_empty());
    }

    #[tokio::test]
    async fn checklist_upsert_keeps_only_latest_save() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Sami").await;
        let activity = create_activity(&pool, &sample_activity(1)).await.unwrap();

        let first = upsert_checklist(
            &pool,
            activity.id,
            worker.id,
            true,
            false,
            "départ ok",
            Mood::Neutral,
        )
        .await
        .unwrap();

        let second = upsert_checklist(
            &pool,
            activity.id,
            worker.id,
            true,
            true,
            "retour ok",
            Mood::Happy,
        )
        .await
        .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.comments, "retour ok");
        assert_eq!(second.mood.as_deref(), Some("happy"));

        let all = get_activity_checklists(&pool, activity.id).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].comments, "retour ok");
    }

    #[tokio::test]
    async fn missing_checklist_is_absent_not_an_error() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Omar").await;
        let activity = create_activity(&pool, &sample_activity(1)).await.unwrap();

        let checklist = get_checklist(&pool, activity.id, worker.id).await.unwrap();
        assert!(checklist.is_none());
    }

    #[tokio::test]
    async fn deleting_an_activity_removes_assignments_and_checklists() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Amine").await;
        let activity = create_activity(&pool, &sample_activity(1)).await.unwrap();

        assign_worker(&pool, activity.id, worker.id).await.unwrap();
        upsert_checklist(&pool, activity.id, worker.id, true, true, "ok", Mood::Happy)
            .await
            .unwrap();

        assert!(delete_activity(&pool, activity.id).await.unwrap());

        assert!(
            get_activity_by_id(&pool, activity.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            get_activity_workers(&pool, activity.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            get_activity_checklists(&pool, activity.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            get_worker_checklists(&pool, worker.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn worker_resolution_by_qr_code() {
        let pool = test_pool().await;
        let worker = seed_worker(&pool, "Yasmine").await;

        let found = get_worker_by_qr_code(&pool, &worker.qr_code).await.unwrap();
        assert_eq!(found.map(|w| w.id), Some(worker.id));

        let missing = get_worker_by_qr_code(&pool, "WORKER_unknown").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn default_admins_are_seeded_once() {
        let pool = test_pool().await;

        // test_pool already ran migrations; running them again must not reseed.
        crate::database::migrations::run_migrations(&pool)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 3);

        let admin = get_admin_by_credentials(&pool, "admin", "admin123")
            .await
            .unwrap();
        assert!(admin.is_some());
    }
}
