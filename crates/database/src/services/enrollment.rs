use crate::{
    entities::{course, enrollment, student},
    error::RecordsError,
};
use chrono::{NaiveDate, Utc};
use log::debug;
use models::grade::Grade;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
    /// Defaults to today (UTC)
    pub enrollment_date: Option<NaiveDate>,
    pub grade: Option<Grade>,
}

impl NewEnrollment {
    pub fn new(student_id: i32, course_id: i32) -> Self {
        Self {
            student_id,
            course_id,
            enrollment_date: None,
            grade: None,
        }
    }

    pub fn on(mut self, enrollment_date: NaiveDate) -> Self {
        self.enrollment_date = Some(enrollment_date);
        self
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = Some(grade);
        self
    }
}

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student in a course. Both must exist and the pair must be new.
    pub async fn enroll<C: ConnectionTrait>(
        db: &C,
        new_enrollment: NewEnrollment,
    ) -> Result<enrollment::Model, RecordsError> {
        let NewEnrollment {
            student_id,
            course_id,
            enrollment_date,
            grade,
        } = new_enrollment;

        if student::Entity::find_by_id(student_id).one(db).await?.is_none() {
            return Err(RecordsError::MissingReference {
                entity: "student",
                field: "student_id",
                id: student_id,
            });
        }
        if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
            return Err(RecordsError::MissingReference {
                entity: "course",
                field: "course_id",
                id: course_id,
            });
        }
        if Self::find(db, student_id, course_id).await?.is_some() {
            return Err(RecordsError::DuplicateEnrollment {
                student_id,
                course_id,
            });
        }

        let enrollment = enrollment::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrollment_date: Set(enrollment_date.unwrap_or_else(|| Utc::now().date_naive())),
            grade: Set(grade),
        }
        .insert(db)
        .await?;

        debug!("Enrolled student {student_id} in course {course_id}");
        Ok(enrollment)
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
        course_id: i32,
    ) -> Result<Option<enrollment::Model>, RecordsError> {
        Ok(enrollment::Entity::find_by_id((student_id, course_id))
            .one(db)
            .await?)
    }

    pub async fn for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> Result<Vec<enrollment::Model>, RecordsError> {
        Ok(enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .order_by_asc(enrollment::Column::CourseId)
            .all(db)
            .await?)
    }

    pub async fn for_course<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
    ) -> Result<Vec<enrollment::Model>, RecordsError> {
        Ok(enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .order_by_asc(enrollment::Column::StudentId)
            .all(db)
            .await?)
    }

    /// Every enrollment, ordered by student then course
    pub async fn all<C: ConnectionTrait>(db: &C) -> Result<Vec<enrollment::Model>, RecordsError> {
        Ok(enrollment::Entity::find()
            .order_by_asc(enrollment::Column::StudentId)
            .order_by_asc(enrollment::Column::CourseId)
            .all(db)
            .await?)
    }

    /// Records or clears the grade on an existing enrollment
    pub async fn set_grade<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
        course_id: i32,
        grade: Option<Grade>,
    ) -> Result<enrollment::Model, RecordsError> {
        let mut active = Self::require(db, student_id, course_id)
            .await?
            .into_active_model();
        active.grade = Set(grade);

        let enrollment = active.update(db).await?;
        debug!("Set grade {grade:?} for student {student_id} in course {course_id}");
        Ok(enrollment)
    }

    /// Removes a single enrollment
    pub async fn withdraw<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
        course_id: i32,
    ) -> Result<(), RecordsError> {
        Self::require(db, student_id, course_id)
            .await?
            .delete(db)
            .await?;

        debug!("Withdrew student {student_id} from course {course_id}");
        Ok(())
    }

    async fn require<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
        course_id: i32,
    ) -> Result<enrollment::Model, RecordsError> {
        Self::find(db, student_id, course_id)
            .await?
            .ok_or(RecordsError::EnrollmentNotFound {
                student_id,
                course_id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::course::NewCourse,
        testing::{add_course, add_student, setup_db},
    };
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_enroll_defaults() {
        let db = setup_db().await;
        let john = add_student(&db, "John", "Doe").await;
        let calculus = add_course(&db, NewCourse::new("Introduction to Calculus", "Robert Sam")).await;

        let today = Utc::now().date_naive();
        let enrollment = EnrollmentService::enroll(&db, NewEnrollment::new(john.id, calculus.id))
            .await
            .unwrap();

        assert_eq!(enrollment.student_id, john.id);
        assert_eq!(enrollment.course_id, calculus.id);
        assert!(enrollment.enrollment_date >= today);
        assert_eq!(enrollment.grade, None);
    }

    #[tokio::test]
    async fn test_ungraded_enrollment_reads_back_as_none() {
        let db = setup_db().await;
        let david = add_student(&db, "David", "Brown").await;
        let history = add_course(&db, NewCourse::new("World History", "Thomas Anderson")).await;
        let programming = add_course(&db, NewCourse::new("Computer Programming", "James Wilson")).await;

        EnrollmentService::enroll(&db, NewEnrollment::new(david.id, history.id))
            .await
            .unwrap();
        EnrollmentService::enroll(
            &db,
            NewEnrollment::new(david.id, programming.id).with_grade(Grade::Pass),
        )
        .await
        .unwrap();

        let grades: Vec<_> = EnrollmentService::for_student(&db, david.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.course_id, e.grade))
            .collect();
        assert_eq!(
            grades,
            vec![(history.id, None), (programming.id, Some(Grade::Pass))]
        );

        let stored = EnrollmentService::find(&db, david.id, history.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.grade, None);
    }

    #[tokio::test]
    async fn test_enroll_with_date_and_grade() {
        let db = setup_db().await;
        let jane = add_student(&db, "Jane", "Smith").await;
        let physics = add_course(&db, NewCourse::new("Physics 101", "Sarah Davis")).await;
        let date = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

        EnrollmentService::enroll(
            &db,
            NewEnrollment::new(jane.id, physics.id)
                .on(date)
                .with_grade(Grade::B),
        )
        .await
        .unwrap();

        let stored = EnrollmentService::find(&db, jane.id, physics.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.enrollment_date, date);
        assert_eq!(stored.grade, Some(Grade::B));
    }

    #[tokio::test]
    async fn test_pairs_are_unique() {
        let db = setup_db().await;
        let john = add_student(&db, "John", "Doe").await;
        let jane = add_student(&db, "Jane", "Smith").await;
        let calculus = add_course(&db, NewCourse::new("Introduction to Calculus", "Robert Sam")).await;
        let physics = add_course(&db, NewCourse::new("Physics 101", "Sarah Davis")).await;

        for (student_id, course_id) in [(john.id, calculus.id), (john.id, physics.id), (jane.id, calculus.id)] {
            EnrollmentService::enroll(&db, NewEnrollment::new(student_id, course_id))
                .await
                .unwrap();
        }

        let duplicate = EnrollmentService::enroll(&db, NewEnrollment::new(john.id, calculus.id)).await;
        assert!(matches!(
            duplicate,
            Err(RecordsError::DuplicateEnrollment { student_id, course_id })
                if student_id == john.id && course_id == calculus.id
        ));

        let all = EnrollmentService::all(&db).await.unwrap();
        assert_eq!(all.len(), 3);
        let pairs: HashSet<_> = all.iter().map(|e| (e.student_id, e.course_id)).collect();
        assert_eq!(pairs.len(), all.len());
    }

    #[tokio::test]
    async fn test_enroll_requires_both_parents() {
        let db = setup_db().await;
        let john = add_student(&db, "John", "Doe").await;
        let calculus = add_course(&db, NewCourse::new("Introduction to Calculus", "Robert Sam")).await;

        assert!(matches!(
            EnrollmentService::enroll(&db, NewEnrollment::new(100, calculus.id)).await,
            Err(RecordsError::MissingReference { entity: "student", id: 100, .. })
        ));
        assert!(matches!(
            EnrollmentService::enroll(&db, NewEnrollment::new(john.id, 200)).await,
            Err(RecordsError::MissingReference { entity: "course", id: 200, .. })
        ));
        assert!(EnrollmentService::all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_grade_and_withdraw() {
        let db = setup_db().await;
        let emily = add_student(&db, "Emily", "Williams").await;
        let biology = add_course(&db, NewCourse::new("Biology Fundamentals", "Jennifer Taylor")).await;
        EnrollmentService::enroll(&db, NewEnrollment::new(emily.id, biology.id))
            .await
            .unwrap();

        let graded = EnrollmentService::set_grade(&db, emily.id, biology.id, Some(Grade::A))
            .await
            .unwrap();
        assert_eq!(graded.grade, Some(Grade::A));

        let cleared = EnrollmentService::set_grade(&db, emily.id, biology.id, None)
            .await
            .unwrap();
        assert_eq!(cleared.grade, None);

        EnrollmentService::withdraw(&db, emily.id, biology.id)
            .await
            .unwrap();
        assert!(
            EnrollmentService::find(&db, emily.id, biology.id)
                .await
                .unwrap()
                .is_none()
        );

        assert!(matches!(
            EnrollmentService::withdraw(&db, emily.id, biology.id).await,
            Err(RecordsError::EnrollmentNotFound { .. })
        ));
    }
}
