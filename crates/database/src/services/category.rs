use crate::{
    entities::{category, course},
    error::RecordsError,
    services::DeleteOutcome,
};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub category_name: String,
    pub price: i32,
}

impl NewCategory {
    pub fn new(category_name: impl Into<String>, price: i32) -> Self {
        Self {
            category_name: category_name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub category_name: Option<String>,
    pub price: Option<i32>,
}

impl CategoryChanges {
    pub fn is_empty(&self) -> bool {
        self.category_name.is_none() && self.price.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub category_name: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

impl CategoryFilter {
    pub fn name(category_name: impl Into<String>) -> Self {
        Self {
            category_name: Some(category_name.into()),
            ..Default::default()
        }
    }

    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(category_name) = &self.category_name {
            condition = condition.add(category::Column::CategoryName.eq(category_name.clone()));
        }
        if let Some(min_price) = self.min_price {
            condition = condition.add(category::Column::Price.gte(min_price));
        }
        if let Some(max_price) = self.max_price {
            condition = condition.add(category::Column::Price.lte(max_price));
        }

        condition
    }
}

pub struct CategoryService;

impl CategoryService {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_category: NewCategory,
    ) -> Result<category::Model, RecordsError> {
        let category = category::ActiveModel {
            category_name: Set(new_category.category_name),
            price: Set(new_category.price),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Created category {}", category.id);
        Ok(category)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<category::Model>, RecordsError> {
        Ok(category::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find<C: ConnectionTrait>(
        db: &C,
        filter: &CategoryFilter,
    ) -> Result<Vec<category::Model>, RecordsError> {
        Ok(category::Entity::find()
            .filter(filter.condition())
            .order_by_asc(category::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn first<C: ConnectionTrait>(
        db: &C,
        filter: &CategoryFilter,
    ) -> Result<Option<category::Model>, RecordsError> {
        Ok(category::Entity::find()
            .filter(filter.condition())
            .order_by_asc(category::Column::Id)
            .one(db)
            .await?)
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, RecordsError> {
        Ok(category::Entity::find().count(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<category::Model, RecordsError> {
        let category = Self::require(db, id).await?;
        if changes.is_empty() {
            return Ok(category);
        }

        let mut active = category.into_active_model();
        if let Some(category_name) = changes.category_name {
            active.category_name = Set(category_name);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }

        let category = active.update(db).await?;
        debug!("Updated category {id}");
        Ok(category)
    }

    /// Detaches every course in the category, then deletes the category
    pub async fn delete<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<DeleteOutcome, RecordsError> {
        let category = Self::require(db, id).await?;

        let courses_detached = course::Entity::update_many()
            .col_expr(course::Column::CategoryId, Expr::value(Option::<i32>::None))
            .filter(course::Column::CategoryId.eq(id))
            .exec(db)
            .await?
            .rows_affected;
        let rows_deleted = category.delete(db).await?.rows_affected;

        debug!("Deleted category {id}, detached {courses_detached} courses");
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
        let category = Self::require(db, id).await?;

        Ok(category
            .find_related(course::Entity)
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?)
    }

    async fn require<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<category::Model, RecordsError> {
        Self::find_by_id(db, id).await?.ok_or(RecordsError::NotFound {
            entity: "category",
            id,
        })
    }
}
