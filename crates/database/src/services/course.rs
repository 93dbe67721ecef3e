use crate::{
    entities::{category, course, enrollment, professor, student},
    error::RecordsError,
    services::DeleteOutcome,
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
    pub professor_id: Option<i32>,
    pub professor_name: String,
    pub category_id: Option<i32>,
}

impl NewCourse {
    pub fn new(name: impl Into<String>, professor_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            professor_id: None,
            professor_name: professor_name.into(),
            category_id: None,
        }
    }

    pub fn with_professor(mut self, professor_id: i32) -> Self {
        self.professor_id = Some(professor_id);
        self
    }

    pub fn in_category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Fields to overwrite on an existing course. `Some(None)` clears a foreign key.
///
/// Changing `professor_id` here does not touch `professor_name`; use
/// [`CourseService::assign_professor`] to move both together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub professor_id: Option<Option<i32>>,
    pub professor_name: Option<String>,
    pub category_id: Option<Option<i32>>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.professor_id.is_none()
            && self.professor_name.is_none()
            && self.category_id.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub name: Option<String>,
    pub professor_id: Option<i32>,
    pub category_id: Option<i32>,
}

impl CourseFilter {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(name) = &self.name {
            condition = condition.add(course::Column::Name.eq(name.clone()));
        }
        if let Some(professor_id) = self.professor_id {
            condition = condition.add(course::Column::ProfessorId.eq(professor_id));
        }
        if let Some(category_id) = self.category_id {
            condition = condition.add(course::Column::CategoryId.eq(category_id));
        }

        condition
    }
}

pub struct CourseService;

impl CourseService {
    /// Creates a course after checking that any professor/category it points at exists
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_course: NewCourse,
    ) -> Result<course::Model, RecordsError> {
        if let Some(professor_id) = new_course.professor_id {
            Self::ensure_professor(db, professor_id).await?;
        }
        if let Some(category_id) = new_course.category_id {
            Self::ensure_category(db, category_id).await?;
        }

        let course = course::ActiveModel {
            name: Set(new_course.name),
            professor_id: Set(new_course.professor_id),
            professor_name: Set(new_course.professor_name),
            category_id: Set(new_course.category_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Created course {}", course.id);
        Ok(course)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<course::Model>, RecordsError> {
        Ok(course::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        filter: &CourseFilter,
    ) -> Result<Vec<course::Model>, RecordsError> {
        Ok(course::Entity::find()
            .filter(filter.condition())
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn first<C: ConnectionTrait>(
        db: &C,
        filter: &CourseFilter,
    ) -> Result<Option<course::Model>, RecordsError> {
        Ok(course::Entity::find()
            .filter(filter.condition())
            .order_by_asc(course::Column::Id)
            .one(db)
            .await?)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, RecordsError> {
        Ok(course::Entity::find().count(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        changes: CourseChanges,
    ) -> Result<course::Model, RecordsError> {
        let course = Self::require(db, id).await?;
        if changes.is_empty() {
            return Ok(course);
        }

        if let Some(Some(professor_id)) = changes.professor_id {
            Self::ensure_professor(db, professor_id).await?;
        }
        if let Some(Some(category_id)) = changes.category_id {
            Self::ensure_category(db, category_id).await?;
        }

        let mut active = course.into_active_model();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(professor_id) = changes.professor_id {
            active.professor_id = Set(professor_id);
        }
        if let Some(professor_name) = changes.professor_name {
            active.professor_name = Set(professor_name);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }

        let course = active.update(db).await?;
        debug!("Updated course {id}");
        Ok(course)
    }

    /// Points the course at a professor and copies the professor's name onto it.
    /// Passing `None` detaches the course and leaves the stored name as it was.
    pub async fn assign_professor<C: ConnectionTrait>(
        db: &C,
        id: i32,
        professor_id: Option<i32>,
    ) -> Result<course::Model, RecordsError> {
        let course = Self::require(db, id).await?;
        let mut active = course.into_active_model();

        match professor_id {
            Some(professor_id) => {
                let professor = Self::ensure_professor(db, professor_id).await?;
                active.professor_id = Set(Some(professor.id));
                active.professor_name = Set(professor.full_name());
            }
            None => active.professor_id = Set(None),
        }

        let course = active.update(db).await?;
        debug!("Assigned professor {professor_id:?} to course {id}");
        Ok(course)
    }

    /// Deletes the course together with all of its enrollments
    pub async fn delete<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<DeleteOutcome, RecordsError> {
        let course = Self::require(db, id).await?;

        let enrollments_removed = enrollment::Entity::delete_many()
            .filter(enrollment::Column::CourseId.eq(id))
            .exec(db)
            .await?
            .rows_affected;
        let rows_deleted = course.delete(db).await?.rows_affected;

        debug!("Deleted course {id} and {enrollments_removed} enrollments");
        Ok(DeleteOutcome {
            rows_deleted,
            enrollments_removed,
            ..Default::default()
        })
    }

    /// Students enrolled in the course
    pub async fn students<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<student::Model>, RecordsError> {
        let course = Self::require(db, id).await?;

        Ok(course
            .find_related(student::Entity)
            .order_by_asc(student::Column::Id)
            .all(db)
            .await?)
    }

    pub(crate) async fn require<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<course::Model, RecordsError> {
        Self::find_by_id(db, id).await?.ok_or(RecordsError::NotFound {
            entity: "course",
            id,
        })
    }

    async fn ensure_professor<C: ConnectionTrait>(
        db: &C,
        professor_id: i32,
    ) -> Result<professor::Model, RecordsError> {
        professor::Entity::find_by_id(professor_id)
            .one(db)
            .await?
            .ok_or(RecordsError::MissingReference {
                entity: "professor",
                field: "professor_id",
                id: professor_id,
            })
    }

    async fn ensure_category<C: ConnectionTrait>(
        db: &C,
        category_id: i32,
    ) -> Result<category::Model, RecordsError> {
        category::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or(RecordsError::MissingReference {
                entity: "category",
                field: "category_id",
                id: category_id,
            })
    }
}
