use crate::Database;
use crate::models::{AnnouncementRow, MessageRow, QuizResultRow, ScheduleRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, Row};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        name: &str,
        role: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, password, name, role) VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, email, password_hash, name, role),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    /// Removes the account only. Messages and quiz results that point at it
    /// stay behind as orphans. Returns whether a row was deleted.
    pub fn delete_user(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
            Ok(n > 0)
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        id: &str,
        user_id: &str,
        content: &str,
        created_at: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, user_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, user_id, content, created_at],
            )?;
            Ok(())
        })
    }

    /// Newest-first, sender resolved at read time.
    pub fn recent_messages(&self, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_recent_messages(conn, limit))
    }

    // -- Announcements --

    pub fn insert_announcement(
        &self,
        id: &str,
        title: &str,
        content: &str,
        priority: &str,
        created_at: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO announcements (id, title, content, priority, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, title, content, priority, created_at],
            )?;
            Ok(())
        })
    }

    pub fn recent_announcements(&self, limit: u32) -> Result<Vec<AnnouncementRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, content, priority, created_at
                 FROM announcements
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1",
            )?;

            let rows = stmt
                .query_map([limit], |row| {
                    Ok(AnnouncementRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        content: row.get(2)?,
                        priority: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Schedule --

    pub fn insert_schedule_item(
        &self,
        id: &str,
        day: &str,
        time: &str,
        subject: &str,
        room: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO schedule (id, day, time, subject, room) VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, day, time, subject, room),
            )?;
            Ok(())
        })
    }

    /// Every schedule item, in whatever order SQLite yields them.
    pub fn all_schedule_items(&self) -> Result<Vec<ScheduleRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, day, time, subject, room FROM schedule")?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(ScheduleRow {
                        id: row.get(0)?,
                        day: row.get(1)?,
                        time: row.get(2)?,
                        subject: row.get(3)?,
                        room: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    // -- Quiz results --

    pub fn insert_quiz_result(
        &self,
        id: &str,
        user_id: &str,
        score: u32,
        total: u32,
        topic: &str,
        created_at: i64,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO quiz_results (id, user_id, score, total, topic, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![id, user_id, score, total, topic, created_at],
            )?;
            Ok(())
        })
    }

    /// Newest-first results owned by `user_id`, at most `limit` of them.
    ///
    /// There is no per-user index: the table is walked newest-first and rows
    /// belonging to other users are dropped before the limit is applied.
    pub fn quiz_results_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<QuizResultRow>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, score, total, topic, created_at
                 FROM quiz_results
                 ORDER BY created_at DESC, rowid DESC",
            )?;

            let mut rows = Vec::new();
            for row in stmt.query_map([], map_quiz_result)? {
                let row = row?;
                if row.user_id != user_id {
                    continue;
                }
                rows.push(row);
                if rows.len() == limit {
                    break;
                }
            }

            Ok(rows)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is always one of our own literals, never caller input
    let sql = format!("SELECT id, email, password, name, role FROM users WHERE {} = ?1", column);
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                name: row.get(3)?,
                role: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_recent_messages(conn: &Connection, limit: u32) -> Result<Vec<MessageRow>> {
    // LEFT JOIN so messages from deleted users still come back
    let mut stmt = conn.prepare(
        "SELECT m.id, m.user_id, m.content, m.created_at, u.name, u.role
         FROM messages m
         LEFT JOIN users u ON m.user_id = u.id
         ORDER BY m.created_at DESC, m.rowid DESC
         LIMIT ?1",
    )?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
                sender_name: row.get(4)?,
                sender_role: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_quiz_result(row: &Row<'_>) -> rusqlite::Result<QuizResultRow> {
    Ok(QuizResultRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        score: row.get(2)?,
        total: row.get(3)?,
        topic: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
