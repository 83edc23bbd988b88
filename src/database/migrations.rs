use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    create_admins_table(pool).await?;
    create_workers_table(pool).await?;
    create_attendance_table(pool).await?;
    create_activities_table(pool).await?;
    create_activity_workers_table(pool).await?;
    create_activity_checklists_table(pool).await?;

    seed_default_admins(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

async fn create_admins_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_workers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            qr_code TEXT UNIQUE NOT NULL,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_attendance_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id INTEGER NOT NULL,
            admin_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            period TEXT NOT NULL CHECK (period IN ('morning', 'afternoon')),
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (worker_id) REFERENCES workers (id) ON DELETE CASCADE,
            FOREIGN KEY (admin_id) REFERENCES admins (id) ON DELETE CASCADE,
            UNIQUE(worker_id, date, period)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_activities_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT DEFAULT '',
            location TEXT NOT NULL,
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            max_participants INTEGER NOT NULL,
            transport_mode TEXT NOT NULL,
            category TEXT NOT NULL,
            created_by INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (created_by) REFERENCES admins (id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_activity_workers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activity_workers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            activity_id INTEGER NOT NULL,
            worker_id INTEGER NOT NULL,
            assigned_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (activity_id) REFERENCES activities (id) ON DELETE CASCADE,
            FOREIGN KEY (worker_id) REFERENCES workers (id) ON DELETE CASCADE,
            UNIQUE(activity_id, worker_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_activity_checklists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activity_checklists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            activity_id INTEGER NOT NULL,
            worker_id INTEGER NOT NULL,
            departure_check BOOLEAN NOT NULL DEFAULT FALSE,
            return_check BOOLEAN NOT NULL DEFAULT FALSE,
            comments TEXT NOT NULL DEFAULT '',
            mood TEXT CHECK (mood IN ('happy', 'neutral', 'sad')),
            last_updated DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (activity_id) REFERENCES activities (id) ON DELETE CASCADE,
            FOREIGN KEY (worker_id) REFERENCES workers (id) ON DELETE CASCADE,
            UNIQUE(activity_id, worker_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seeds the three default admin accounts, only when the table is empty.
async fn seed_default_admins(pool: &SqlitePool) -> Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        return Ok(());
    }

    info!("Seeding default admin accounts...");

    let defaults = [
        ("Admin Principal", "admin", "admin123"),
        ("Admin 2", "admin2", "admin123"),
        ("Admin 3", "admin3", "admin123"),
    ];

    for (name, username, password) in defaults {
        sqlx::query("INSERT INTO admins (name, username, password) VALUES (?, ?, ?)")
            .bind(name)
            .bind(username)
            .bind(password)
            .execute(pool)
            .await?;
    }

    Ok(())
}
