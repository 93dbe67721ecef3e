use sea_orm::DbErr;
use thiserror::Error;

/// Failure of a storage operation. Any of these aborts the surrounding unit of work.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{field} references {entity} {id}, which does not exist")]
    MissingReference {
        entity: &'static str,
        field: &'static str,
        id: i32,
    },

    #[error("student {student_id} is not enrolled in course {course_id}")]
    EnrollmentNotFound { student_id: i32, course_id: i32 },

    #[error("student {student_id} is already enrolled in course {course_id}")]
    DuplicateEnrollment { student_id: i32, course_id: i32 },

    #[error("configuration error: {0}")]
    Config(String),
}
