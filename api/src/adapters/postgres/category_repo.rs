//! PostgreSQL adapter for CategoryRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    Category, CategoryId, CategoryStatus, NewCategory, UpdateCategory,
};
use crate::domain::ports::CategoryRepository;
use crate::entity::categories;
use crate::error::DomainError;

/// PostgreSQL implementation of CategoryRepository
pub struct PostgresCategoryRepository {
    db: DatabaseConnection,
}

impl PostgresCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `LOWER(name) LIKE '%needle%'`, case-insensitive substring match
fn name_contains(needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(categories::Column::Name)))
        .like(format!("%{}%", needle.to_lowercase()))
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::DuplicateKey(format!("Category with name {} already exists", name))
}

fn category_not_found(id: &CategoryId) -> DomainError {
    DomainError::NotFound(format!("Category {} not found", id))
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let result = categories::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        let result = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let count = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let results = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_active(&self) -> Result<Vec<Category>, DomainError> {
        let results = categories::Entity::find()
            .filter(categories::Column::Status.eq(CategoryStatus::Active.to_string()))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Category>, DomainError> {
        let results = categories::Entity::find()
            .filter(name_contains(name))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, category: &NewCategory) -> Result<Category, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let taken = categories::Entity::find()
            .filter(categories::Column::Name.eq(&category.name))
            .count(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if taken > 0 {
            return Err(duplicate_name(&category.name));
        }

        let now = Utc::now().fixed_offset();
        let model = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(category.name.clone()),
            description: Set(category.description.clone()),
            status: Set(CategoryStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique index backs the in-transaction check
        let inserted = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_name(&category.name),
            _ => DomainError::Database(e.to_string()),
        })?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(inserted.into())
    }

    async fn update(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
    ) -> Result<Category, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let existing = categories::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| category_not_found(id))?;

        if changes.name != existing.name {
            let taken = categories::Entity::find()
                .filter(categories::Column::Name.eq(&changes.name))
                .count(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            if taken > 0 {
                return Err(duplicate_name(&changes.name));
            }
        }

        let mut model = existing.into_active_model();
        model.name = Set(changes.name.clone());
        model.description = Set(changes.description.clone());
        model.status = Set(changes.status.to_string());
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = model.update(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_name(&changes.name),
            _ => DomainError::Database(e.to_string()),
        })?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(updated.into())
    }

    async fn update_status(
        &self,
        id: &CategoryId,
        status: CategoryStatus,
    ) -> Result<(), DomainError> {
        let result = categories::ActiveModel {
            id: Set(id.0),
            status: Set(status.to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(category_not_found(id)),
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), DomainError> {
        let result = categories::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(category_not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        categories::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
