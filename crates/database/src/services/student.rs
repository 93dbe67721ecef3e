use crate::{
    entities::{course, enrollment, student},
    error::RecordsError,
    services::DeleteOutcome,
};
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub second_name: String,
    pub age: Option<i32>,
}

impl NewStudent {
    pub fn new(first_name: impl Into<String>, second_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            second_name: second_name.into(),
            age: None,
        }
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Fields to overwrite on an existing student. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    /// `Some(None)` clears the age
    pub age: Option<Option<i32>>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.second_name.is_none() && self.age.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl StudentFilter {
    pub fn first_name(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(first_name) = &self.first_name {
            condition = condition.add(student::Column::FirstName.eq(first_name.clone()));
        }
        if let Some(second_name) = &self.second_name {
            condition = condition.add(student::Column::SecondName.eq(second_name.clone()));
        }
        if let Some(min_age) = self.min_age {
            condition = condition.add(student::Column::Age.gte(min_age));
        }
        if let Some(max_age) = self.max_age {
            condition = condition.add(student::Column::Age.lte(max_age));
        }

        condition
    }
}

pub struct StudentService;

impl StudentService {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_student: NewStudent,
    ) -> Result<student::Model, RecordsError> {
        let student = student::ActiveModel {
            first_name: Set(new_student.first_name),
            second_name: Set(new_student.second_name),
            age: Set(new_student.age),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Created student {}", student.id);
        Ok(student)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<student::Model>, RecordsError> {
        Ok(student::Entity::find_by_id(id).one(db).await?)
    }

    /// All students matching the filter, ordered by id
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        filter: &StudentFilter,
    ) -> Result<Vec<student::Model>, RecordsError> {
        Ok(student::Entity::find()
            .filter(filter.condition())
            .order_by_asc(student::Column::Id)
            .all(db)
            .await?)
    }

    /// The lowest-id student matching the filter
    pub async fn first<C: ConnectionTrait>(
        db: &C,
        filter: &StudentFilter,
    ) -> Result<Option<student::Model>, RecordsError> {
        Ok(student::Entity::find()
            .filter(filter.condition())
            .order_by_asc(student::Column::Id)
            .one(db)
            .await?)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, RecordsError> {
        Ok(student::Entity::find().count(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        changes: StudentChanges,
    ) -> Result<student::Model, RecordsError> {
        let student = Self::require(db, id).await?;
        if changes.is_empty() {
            return Ok(student);
        }

        let mut active = student.into_active_model();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(second_name) = changes.second_name {
            active.second_name = Set(second_name);
        }
        if let Some(age) = changes.age {
            active.age = Set(age);
        }

        let student = active.update(db).await?;
        debug!("Updated student {id}");
        Ok(student)
    }

    /// Deletes the student together with all of its enrollments
    pub async fn delete<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<DeleteOutcome, RecordsError> {
        let student = Self::require(db, id).await?;

        let enrollments_removed = enrollment::Entity::delete_many()
            .filter(enrollment::Column::StudentId.eq(id))
            .exec(db)
            .await?
            .rows_affected;
        let rows_deleted = student.delete(db).await?.rows_affected;

        debug!("Deleted student {id} and {enrollments_removed} enrollments");
        Ok(DeleteOutcome {
            rows_deleted,
            enrollments_removed,
            ..Default::default()
        })
    }

    /// Courses the student is enrolled in
    pub async fn courses<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<course::Model>, RecordsError> {
        let student = Self::require(db, id).await?;

        Ok(student
            .find_related(course::Entity)
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?)
    }

    async fn require<C: ConnectionTrait>(db: &C, id: i32) -> Result<student::Model, RecordsError> {
        Self::find_by_id(db, id).await?.ok_or(RecordsError::NotFound {
            entity: "student",
            id,
        })
    }
}
