use database::{
    RecordsError,
    services::{
        DeleteOutcome,
        category::{CategoryChanges, CategoryFilter, CategoryService},
        course::{CourseChanges, CourseFilter, CourseService},
        professor::{ProfessorChanges, ProfessorFilter, ProfessorService},
        student::{StudentChanges, StudentFilter, StudentService},
    },
    unit_of_work,
};
use log::{debug, info};
use sea_orm::DatabaseConnection;

/// Updates two rows of each table in one unit of work. Rows that cannot be found are skipped.
pub async fn update_records(db: &DatabaseConnection) -> Result<(), RecordsError> {
    unit_of_work::run::<(), _>(db, |txn| {
        Box::pin(async move {
            let student_changes = [
                (
                    "John",
                    StudentChanges {
                        age: Some(Some(21)),
                        second_name: Some("Updated".to_string()),
                        ..Default::default()
                    },
                ),
                (
                    "Jane",
                    StudentChanges {
                        age: Some(Some(22)),
                        first_name: Some("Janet".to_string()),
                        ..Default::default()
                    },
                ),
            ];
            for (first_name, changes) in student_changes {
                match StudentService::first(txn, &StudentFilter::first_name(first_name)).await? {
                    Some(student) => {
                        StudentService::update(txn, student.id, changes).await?;
                    }
                    None => debug!("No student named {first_name}, skipping update"),
                }
            }

            for (first_name, subjects) in [
                ("Robert", "Advanced Mathematics"),
                ("Sarah", "Advanced Physics"),
            ] {
                match ProfessorService::first(txn, &ProfessorFilter::first_name(first_name)).await? {
                    Some(professor) => {
                        let changes = ProfessorChanges {
                            teaching_subjects: Some(subjects.to_string()),
                            ..Default::default()
                        };
                        ProfessorService::update(txn, professor.id, changes).await?;
                    }
                    None => debug!("No professor named {first_name}, skipping update"),
                }
            }

            for (name, new_name) in [
                ("Introduction to Calculus", "Advanced Calculus"),
                ("Physics 101", "Advanced Physics"),
            ] {
                match CourseService::first(txn, &CourseFilter::name(name)).await? {
                    Some(course) => {
                        let changes = CourseChanges {
                            name: Some(new_name.to_string()),
                            ..Default::default()
                        };
                        CourseService::update(txn, course.id, changes).await?;
                    }
                    None => debug!("No course named {name}, skipping update"),
                }
            }

            for (name, price) in [("Mathematics", 150), ("Science", 180)] {
                match CategoryService::first(txn, &CategoryFilter::name(name)).await? {
                    Some(category) => {
                        let changes = CategoryChanges {
                            price: Some(price),
                            ..Default::default()
                        };
                        CategoryService::update(txn, category.id, changes).await?;
                    }
                    None => debug!("No category named {name}, skipping update"),
                }
            }

            Ok(())
        })
    })
    .await?;

    info!("Applied record updates");
    println!("Successfully updated records!");
    Ok(())
}

/// Deletes one row of each table in one unit of work. Rows that cannot be found are skipped.
pub async fn delete_records(db: &DatabaseConnection) -> Result<(), RecordsError> {
    let outcomes = unit_of_work::run::<Vec<DeleteOutcome>, _>(db, |txn| {
        Box::pin(async move {
            let mut outcomes = Vec::new();

            if let Some(student) =
                StudentService::first(txn, &StudentFilter::first_name("Michael")).await?
            {
                let outcome = StudentService::delete(txn, student.id).await?;
                info!(
                    "Deleted student {} with {} enrollments",
                    student.id, outcome.enrollments_removed
                );
                outcomes.push(outcome);
            }

            if let Some(professor) =
                ProfessorService::first(txn, &ProfessorFilter::first_name("James")).await?
            {
                let outcome = ProfessorService::delete(txn, professor.id).await?;
                info!(
                    "Deleted professor {}, {} courses left without a professor",
                    professor.id, outcome.courses_detached
                );
                outcomes.push(outcome);
            }

            if let Some(course) =
                CourseService::first(txn, &CourseFilter::name("Computer Programming")).await?
            {
                let outcome = CourseService::delete(txn, course.id).await?;
                info!(
                    "Deleted course {} with {} enrollments",
                    course.id, outcome.enrollments_removed
                );
                outcomes.push(outcome);
            }

            if let Some(category) =
                CategoryService::first(txn, &CategoryFilter::name("Technology")).await?
            {
                let outcome = CategoryService::delete(txn, category.id).await?;
                info!(
                    "Deleted category {}, {} courses left uncategorized",
                    category.id, outcome.courses_detached
                );
                outcomes.push(outcome);
            }

            Ok(outcomes)
        })
    })
    .await?;

    let affected: u64 = outcomes.iter().map(DeleteOutcome::affected_count).sum();
    info!("Deleted {} records, {affected} rows changed in total", outcomes.len());
    println!("Successfully deleted records!");
    Ok(())
}
