use uuid::Uuid;

use sensei_db::Database;
use sensei_db::models::UserRow;
use sensei_types::models::Role;

use crate::error::{ApiError, ApiResult};

/// Load the acting user, failing with `UserNotFound` if the id resolves to nobody.
pub fn require_user(db: &Database, user_id: Uuid) -> ApiResult<UserRow> {
    db.get_user_by_id(&user_id.to_string())?
        .ok_or(ApiError::UserNotFound)
}

/// Load the acting user and insist on the teacher role.
/// A missing user is refused the same way as a student.
pub fn require_teacher(db: &Database, user_id: Uuid) -> ApiResult<UserRow> {
    match db.get_user_by_id(&user_id.to_string())? {
        Some(user) if user.role == Role::Teacher.as_str() => Ok(user),
        _ => Err(ApiError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_checks_existence_and_role() {
        let db = Database::open_in_memory().unwrap();
        let teacher = Uuid::new_v4();
        let student = Uuid::new_v4();
        db.create_user(&teacher.to_string(), "t@x.io", "h", "Laoshi", "teacher").unwrap();
        db.create_user(&student.to_string(), "s@x.io", "h", "Xuesheng", "student").unwrap();

        assert_eq!(require_teacher(&db, teacher).unwrap().name, "Laoshi");
        assert!(matches!(require_teacher(&db, student), Err(ApiError::Unauthorized)));
        assert!(matches!(require_teacher(&db, Uuid::new_v4()), Err(ApiError::Unauthorized)));

        assert!(require_user(&db, student).is_ok());
        assert!(matches!(require_user(&db, Uuid::new_v4()), Err(ApiError::UserNotFound)));
    }
}
