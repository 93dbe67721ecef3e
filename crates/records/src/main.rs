mod changes;
mod seed;
mod view;

use database::{
    RecordsError,
    db::{DatabaseConfig, create_connection},
};
use log::info;
use migration::{Migrator, MigratorTrait};

/// Runs the sample session: seed, update, delete, printing every table in between
#[tokio::main]
async fn main() -> Result<(), RecordsError> {
    env_logger::init();

    let config = DatabaseConfig::from_env()?;
    let db = create_connection(&config).await?;

    info!("Applying schema migrations");
    Migrator::up(&db, None).await?;

    seed::insert_sample_data(&db).await?;
    println!("\nInitial data:");
    view::view_all_data(&db).await?;

    changes::update_records(&db).await?;
    println!("\nData after updates:");
    view::view_all_data(&db).await?;

    changes::delete_records(&db).await?;
    println!("\nFinal data after deletions:");
    view::view_all_data(&db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::services::{
        category::{CategoryFilter, CategoryService},
        course::{CourseFilter, CourseService},
        enrollment::EnrollmentService,
        professor::{ProfessorFilter, ProfessorService},
        student::{StudentFilter, StudentService},
    };
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    async fn setup_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);

        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let db = setup_db().await;

        seed::insert_sample_data(&db).await.unwrap();
        seed::insert_sample_data(&db).await.unwrap();

        assert_eq!(StudentService::count(&db).await.unwrap(), 5);
        assert_eq!(ProfessorService::count(&db).await.unwrap(), 5);
        assert_eq!(CategoryService::count(&db).await.unwrap(), 5);
        assert_eq!(CourseService::count(&db).await.unwrap(), 5);

        let enrollments = EnrollmentService::all(&db).await.unwrap();
        assert_eq!(enrollments.len(), 7);
        assert_eq!(enrollments.iter().filter(|e| e.grade.is_none()).count(), 3);
    }

    #[tokio::test]
    async fn test_full_session() {
        let db = setup_db().await;

        seed::insert_sample_data(&db).await.unwrap();
        changes::update_records(&db).await.unwrap();
        changes::delete_records(&db).await.unwrap();
        view::view_all_data(&db).await.unwrap();

        let students = StudentService::find(&db, &StudentFilter::default()).await.unwrap();
        let first_names: Vec<_> = students.iter().map(|s| s.first_name.as_str()).collect();
        assert_eq!(first_names, vec!["John", "Janet", "Emily", "David"]);
        assert_eq!(students[0].second_name, "Updated");
        assert_eq!(students[0].age, Some(21));
        assert_eq!(students[1].second_name, "Smith");
        assert_eq!(students[1].age, Some(22));

        let robert = ProfessorService::first(&db, &ProfessorFilter::first_name("Robert"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(robert.teaching_subjects, "Advanced Mathematics");
        assert!(
            ProfessorService::first(&db, &ProfessorFilter::first_name("James"))
                .await
                .unwrap()
                .is_none()
        );

        let course_names: Vec<_> = CourseService::find(&db, &CourseFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            course_names,
            vec![
                "Advanced Calculus",
                "Advanced Physics",
                "Biology Fundamentals",
                "World History"
            ]
        );

        let maths = CategoryService::first(&db, &CategoryFilter::name("Mathematics"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(maths.price, 150);
        assert!(
            CategoryService::first(&db, &CategoryFilter::name("Technology"))
                .await
                .unwrap()
                .is_none()
        );

        assert_eq!(EnrollmentService::all(&db).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_changes_skip_missing_rows() {
        let db = setup_db().await;

        // Nothing to find on an empty database
        changes::update_records(&db).await.unwrap();
        changes::delete_records(&db).await.unwrap();
        assert_eq!(StudentService::count(&db).await.unwrap(), 0);

        seed::insert_sample_data(&db).await.unwrap();
        changes::delete_records(&db).await.unwrap();
        changes::delete_records(&db).await.unwrap();

        assert_eq!(StudentService::count(&db).await.unwrap(), 4);
        assert_eq!(ProfessorService::count(&db).await.unwrap(), 4);
        assert_eq!(CourseService::count(&db).await.unwrap(), 4);
        assert_eq!(CategoryService::count(&db).await.unwrap(), 4);
        assert_eq!(EnrollmentService::all(&db).await.unwrap().len(), 5);
    }
}
