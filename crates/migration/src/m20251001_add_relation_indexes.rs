use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on course.professor_id for detaching courses on professor delete
        manager
            .create_index(
                Index::create()
                    .name("idx_course_professor_id")
                    .table(Course::Table)
                    .col(Course::ProfessorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_category_id")
                    .table(Course::Table)
                    .col(Course::CategoryId)
                    .to_owned(),
            )
            .await?;

        // The composite key already leads with student_id
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollment_course_id")
                    .table(Enrollment::Table)
                    .col(Enrollment::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollment_course_id")
                    .table(Enrollment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_category_id")
                    .table(Course::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_professor_id")
                    .table(Course::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Course {
    Table,
    ProfessorId,
    CategoryId,
}

#[derive(Iden)]
enum Enrollment {
    Table,
    CourseId,
}
