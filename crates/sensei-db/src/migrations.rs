use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// `user_id` columns deliberately have no REFERENCES clause: removing a user
/// must leave their messages and quiz results in place as orphans.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          TEXT PRIMARY KEY,
            email       TEXT NOT NULL,
            password    TEXT NOT NULL,
            name        TEXT NOT NULL,
            role        TEXT NOT NULL CHECK (role IN ('student', 'teacher'))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email
            ON users(email);

        CREATE TABLE IF NOT EXISTS messages (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            content     TEXT NOT NULL,
            created_at  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS announcements (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            content     TEXT NOT NULL,
            priority    TEXT NOT NULL CHECK (priority IN ('normal', 'urgent')),
            created_at  INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schedule (
            id          TEXT PRIMARY KEY,
            day         TEXT NOT NULL,
            time        TEXT NOT NULL,
            subject     TEXT NOT NULL,
            room        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS quiz_results (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL,
            score       INTEGER NOT NULL,
            total       INTEGER NOT NULL,
            topic       TEXT NOT NULL,
            created_at  INTEGER NOT NULL
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
