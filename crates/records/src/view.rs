use database::{
    RecordsError,
    entities::{category, course, enrollment, professor, student},
    services::{
        category::{CategoryFilter, CategoryService},
        course::{CourseFilter, CourseService},
        enrollment::EnrollmentService,
        professor::{ProfessorFilter, ProfessorService},
        student::{StudentFilter, StudentService},
    },
};
use sea_orm::DatabaseConnection;

/// Prints every table, one row per line
pub async fn view_all_data(db: &DatabaseConnection) -> Result<(), RecordsError> {
    println!("\nStudents:");
    for student in StudentService::find(db, &StudentFilter::default()).await? {
        println!("{}", student_line(&student));
    }

    println!("\nProfessors:");
    for professor in ProfessorService::find(db, &ProfessorFilter::default()).await? {
        println!("{}", professor_line(&professor));
    }

    println!("\nCourses:");
    for course in CourseService::find(db, &CourseFilter::default()).await? {
        println!("{}", course_line(&course));
    }

    println!("\nCategories:");
    for category in CategoryService::find(db, &CategoryFilter::default()).await? {
        println!("{}", category_line(&category));
    }

    println!("\nEnrollments:");
    for enrollment in EnrollmentService::all(db).await? {
        println!("{}", enrollment_line(&enrollment));
    }

    Ok(())
}

fn student_line(student: &student::Model) -> String {
    format!(
        "Student(id={}, first_name={}, second_name={})",
        student.id, student.first_name, student.second_name
    )
}

fn professor_line(professor: &professor::Model) -> String {
    format!(
        "Professor(id={}, first_name={}, second_name={})",
        professor.id, professor.first_name, professor.second_name
    )
}

fn course_line(course: &course::Model) -> String {
    format!("Course(id={}, name={})", course.id, course.name)
}

fn category_line(category: &category::Model) -> String {
    format!(
        "Category(id={}, category_name={}, price={})",
        category.id, category.category_name, category.price
    )
}

fn enrollment_line(enrollment: &enrollment::Model) -> String {
    let grade = enrollment
        .grade
        .map(|grade| format!("{grade} ({})", grade.as_full_str()))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Enrollment(student_id={}, course_id={}, enrollment_date={}, grade={})",
        enrollment.student_id, enrollment.course_id, enrollment.enrollment_date, grade
    )
}
