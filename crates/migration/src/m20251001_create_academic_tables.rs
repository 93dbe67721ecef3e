use sea_orm_migration::prelude::*;

/// Length of a student's or professor's first and second name
pub const NAME_LEN: u32 = 25;
/// Room for `first_name second_name` copied from a professor onto a course
pub const PROFESSOR_NAME_LEN: u32 = NAME_LEN * 2 + 1;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create student table
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::FirstName).string_len(NAME_LEN).not_null())
                    .col(ColumnDef::new(Student::SecondName).string_len(NAME_LEN).not_null())
                    .col(ColumnDef::new(Student::Age).integer())
                    .col(
                        ColumnDef::new(Student::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create professor table
        manager
            .create_table(
                Table::create()
                    .table(Professor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professor::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Professor::FirstName)
                            .string_len(NAME_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professor::SecondName)
                            .string_len(NAME_LEN)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professor::TeachingSubjects)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Professor::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create category table
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Category::CategoryName)
                            .string_len(25)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Category::Price).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Create course table, detached from its professor/category when either is deleted
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Name).string_len(50).not_null())
                    .col(ColumnDef::new(Course::ProfessorId).integer())
                    .col(
                        ColumnDef::new(Course::ProfessorName)
                            .string_len(PROFESSOR_NAME_LEN)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Course::CategoryId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course-professor_id")
                            .from(Course::Table, Course::ProfessorId)
                            .to(Professor::Table, Professor::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-course-category_id")
                            .from(Course::Table, Course::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollment junction table (many-to-many), keyed by the pair
        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Enrollment::StudentId).integer().not_null())
                    .col(ColumnDef::new(Enrollment::CourseId).integer().not_null())
                    .col(ColumnDef::new(Enrollment::EnrollmentDate).date().not_null())
                    .col(ColumnDef::new(Enrollment::Grade).string_len(2))
                    .primary_key(
                        Index::create()
                            .name("pk-enrollment")
                            .col(Enrollment::StudentId)
                            .col(Enrollment::CourseId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollment-student_id")
                            .from(Enrollment::Table, Enrollment::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollment-course_id")
                            .from(Enrollment::Table, Enrollment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Enrollment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professor::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Student {
    Table,
    Id,
    FirstName,
    SecondName,
    Age,
    CreatedAt,
}

#[derive(Iden)]
enum Professor {
    Table,
    Id,
    FirstName,
    SecondName,
    TeachingSubjects,
    CreatedAt,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
    CategoryName,
    Price,
}

#[derive(Iden)]
enum Course {
    Table,
    Id,
    Name,
    ProfessorId,
    ProfessorName,
    CategoryId,
}

#[derive(Iden)]
enum Enrollment {
    Table,
    StudentId,
    CourseId,
    EnrollmentDate,
    Grade,
}
