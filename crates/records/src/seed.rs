use database::{
    RecordsError,
    services::{
        category::{CategoryService, NewCategory},
        course::{CourseService, NewCourse},
        enrollment::{EnrollmentService, NewEnrollment},
        professor::{NewProfessor, ProfessorService},
        student::{NewStudent, StudentService},
    },
    unit_of_work,
};
use log::info;
use models::grade::Grade;
use sea_orm::DatabaseConnection;

/// (first name, second name, age)
const STUDENTS: [(&str, &str, i32); 5] = [
    ("John", "Doe", 20),
    ("Jane", "Smith", 21),
    ("Michael", "Johnson", 22),
    ("Emily", "Williams", 19),
    ("David", "Brown", 20),
];

/// (first name, second name, teaching subjects)
const PROFESSORS: [(&str, &str, &str); 5] = [
    ("Robert", "Sam", "Mathematics"),
    ("Sarah", "Davis", "Physics"),
    ("James", "Wilson", "Computer Science"),
    ("Jennifer", "Taylor", "Biology"),
    ("Thomas", "Anderson", "History"),
];

/// (name, price)
const CATEGORIES: [(&str, i32); 5] = [
    ("Mathematics", 100),
    ("Science", 120),
    ("Technology", 150),
    ("Humanities", 80),
    ("Social Sciences", 90),
];

/// (course name, index into PROFESSORS, index into CATEGORIES)
const COURSES: [(&str, usize, usize); 5] = [
    ("Introduction to Calculus", 0, 0),
    ("Physics 101", 1, 1),
    ("Computer Programming", 2, 2),
    ("Biology Fundamentals", 3, 1),
    ("World History", 4, 3),
];

/// (index into STUDENTS, index into COURSES, grade)
const ENROLLMENTS: [(usize, usize, Option<Grade>); 7] = [
    (0, 0, Some(Grade::A)),
    (0, 1, None),
    (1, 0, Some(Grade::B)),
    (2, 2, None),
    (2, 4, Some(Grade::C)),
    (3, 3, None),
    (4, 4, Some(Grade::Pass)),
];

/// Inserts the sample rows in one unit of work, unless students already exist
pub async fn insert_sample_data(db: &DatabaseConnection) -> Result<(), RecordsError> {
    if StudentService::count(db).await? > 0 {
        println!("Sample data already exists. Skipping insertion.");
        return Ok(());
    }

    unit_of_work::run::<(), _>(db, |txn| {
        Box::pin(async move {
            let mut student_ids = Vec::with_capacity(STUDENTS.len());
            for (first_name, second_name, age) in STUDENTS {
                let student =
                    StudentService::create(txn, NewStudent::new(first_name, second_name).with_age(age))
                        .await?;
                student_ids.push(student.id);
            }

            let mut professors = Vec::with_capacity(PROFESSORS.len());
            for (first_name, second_name, subjects) in PROFESSORS {
                professors.push(
                    ProfessorService::create(txn, NewProfessor::new(first_name, second_name, subjects))
                        .await?,
                );
            }

            let mut category_ids = Vec::with_capacity(CATEGORIES.len());
            for (name, price) in CATEGORIES {
                category_ids.push(CategoryService::create(txn, NewCategory::new(name, price)).await?.id);
            }

            let mut course_ids = Vec::with_capacity(COURSES.len());
            for (name, professor_idx, category_idx) in COURSES {
                let professor = &professors[professor_idx];
                let new_course = NewCourse::new(name, professor.full_name())
                    .with_professor(professor.id)
                    .in_category(category_ids[category_idx]);
                course_ids.push(CourseService::create(txn, new_course).await?.id);
            }

            for (student_idx, course_idx, grade) in ENROLLMENTS {
                let mut new_enrollment =
                    NewEnrollment::new(student_ids[student_idx], course_ids[course_idx]);
                new_enrollment.grade = grade;
                EnrollmentService::enroll(txn, new_enrollment).await?;
            }

            Ok(())
        })
    })
    .await?;

    info!("Inserted sample data");
    println!("Successfully inserted sample data!");
    Ok(())
}
