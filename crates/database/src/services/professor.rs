use crate::{
    entities::{course, professor},
    error::RecordsError,
    services::DeleteOutcome,
};
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfessor {
    pub first_name: String,
    pub second_name: String,
    pub teaching_subjects: String,
}

impl NewProfessor {
    pub fn new(
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        teaching_subjects: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            second_name: second_name.into(),
            teaching_subjects: teaching_subjects.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfessorChanges {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub teaching_subjects: Option<String>,
}

impl ProfessorChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.second_name.is_none() && self.teaching_subjects.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfessorFilter {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    /// Substring of the teaching subjects
    pub teaches: Option<String>,
}

impl ProfessorFilter {
    pub fn first_name(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(first_name) = &self.first_name {
            condition = condition.add(professor::Column::FirstName.eq(first_name.clone()));
        }
        if let Some(second_name) = &self.second_name {
            condition = condition.add(professor::Column::SecondName.eq(second_name.clone()));
        }
        if let Some(subject) = &self.teaches {
            condition = condition.add(professor::Column::TeachingSubjects.contains(subject));
        }

        condition
    }
}

pub struct ProfessorService;

impl ProfessorService {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_professor: NewProfessor,
    ) -> Result<professor::Model, RecordsError> {
        let professor = professor::ActiveModel {
            first_name: Set(new_professor.first_name),
            second_name: Set(new_professor.second_name),
            teaching_subjects: Set(new_professor.teaching_subjects),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Created professor {}", professor.id);
        Ok(professor)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<professor::Model>, RecordsError> {
        Ok(professor::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        filter: &ProfessorFilter,
    ) -> Result<Vec<professor::Model>, RecordsError> {
        Ok(professor::Entity::find()
            .filter(filter.condition())
            .order_by_asc(professor::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn first<C: ConnectionTrait>(
        db: &C,
        filter: &ProfessorFilter,
    ) -> Result<Option<professor::Model>, RecordsError> {
        Ok(professor::Entity::find()
            .filter(filter.condition())
            .order_by_asc(professor::Column::Id)
            .one(db)
            .await?)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, RecordsError> {
        Ok(professor::Entity::find().count(db).await?)
    }

    /// Updates the professor row only. Courses keep whatever `professor_name` they hold.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        changes: ProfessorChanges,
    ) -> Result<professor::Model, RecordsError> {
        let professor = Self::require(db, id).await?;
        if changes.is_empty() {
            return Ok(professor);
        }

        let mut active = professor.into_active_model();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(second_name) = changes.second_name {
            active.second_name = Set(second_name);
        }
        if let Some(teaching_subjects) = changes.teaching_subjects {
            active.teaching_subjects = Set(teaching_subjects);
        }

        let professor = active.update(db).await?;
        debug!("Updated professor {id}");
        Ok(professor)
    }

    /// Detaches every course taught by the professor, then deletes the professor
    pub async fn delete<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<DeleteOutcome, RecordsError> {
        let professor = Self::require(db, id).await?;

        let courses_detached = course::Entity::update_many()
            .col_expr(course::Column::ProfessorId, Expr::value(Option::<i32>::None))
            .filter(course::Column::ProfessorId.eq(id))
            .exec(db)
            .await?
            .rows_affected;
        let rows_deleted = professor.delete(db).await?.rows_affected;

        debug!("Deleted professor {id}, detached {courses_detached} courses");
        Ok(DeleteOutcome {
            rows_deleted,
            courses_detached,
            ..Default::default()
        })
    }

    pub async fn courses<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Vec<course::Model>, RecordsError> {
        let professor = Self::require(db, id).await?;

        Ok(professor
            .find_related(course::Entity)
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?)
    }

    async fn require<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<professor::Model, RecordsError> {
        Self::find_by_id(db, id).await?.ok_or(RecordsError::NotFound {
            entity: "professor",
            id,
        })
    }
}
