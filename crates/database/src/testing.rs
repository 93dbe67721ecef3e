use crate::{
    entities::{category, course, professor, student},
    services::{
        category::{CategoryService, NewCategory},
        course::{CourseService, NewCourse},
        professor::{NewProfessor, ProfessorService},
        student::{NewStudent, StudentService},
    },
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with the full schema applied
pub(crate) async fn setup_db() -> DatabaseConnection {
    // Every pooled connection to `:memory:` would see its own database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");
    db
}

pub(crate) async fn add_student(db: &DatabaseConnection, first: &str, second: &str) -> student::Model {
    StudentService::create(db, NewStudent::new(first, second))
        .await
        .unwrap()
}

pub(crate) async fn add_professor(
    db: &DatabaseConnection,
    first: &str,
    second: &str,
) -> professor::Model {
    ProfessorService::create(db, NewProfessor::new(first, second, "Mathematics"))
        .await
        .unwrap()
}

pub(crate) async fn add_category(db: &DatabaseConnection, name: &str, price: i32) -> category::Model {
    CategoryService::create(db, NewCategory::new(name, price))
        .await
        .unwrap()
}

pub(crate) async fn add_course(db: &DatabaseConnection, new_course: NewCourse) -> course::Model {
    CourseService::create(db, new_course).await.unwrap()
}
