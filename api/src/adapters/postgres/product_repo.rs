//! PostgreSQL adapter for ProductRepository
//!
//! Check-then-write operations run inside a transaction, with the unique
//! index on `sku` as the serialization backstop. Stock adjustments are a
//! single conditional UPDATE so concurrent writers cannot lose updates.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    CategoryCount, NewProduct, Product, ProductFilter, ProductId, ProductSortField, ProductStatus,
    SortDirection, UpdateProduct,
};
use crate::domain::ports::ProductRepository;
use crate::entity::products;
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `LOWER(name) LIKE '%needle%'`, case-insensitive substring match
fn name_contains(needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(products::Column::Name)))
        .like(format!("%{}%", needle.to_lowercase()))
}

fn sort_column(field: ProductSortField) -> products::Column {
    match field {
        ProductSortField::Id => products::Column::Id,
        ProductSortField::Name => products::Column::Name,
        ProductSortField::Sku => products::Column::Sku,
        ProductSortField::Price => products::Column::Price,
        ProductSortField::Quantity => products::Column::Quantity,
        ProductSortField::Category => products::Column::Category,
        ProductSortField::Brand => products::Column::Brand,
        ProductSortField::CreatedAt => products::Column::CreatedAt,
        ProductSortField::UpdatedAt => products::Column::UpdatedAt,
    }
}

fn duplicate_sku(sku: &str) -> DomainError {
    DomainError::DuplicateKey(format!("Product with SKU {} already exists", sku))
}

fn product_not_found(id: &ProductId) -> DomainError {
    DomainError::NotFound(format!("Product {} not found", id))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find()
            .filter(products::Column::Sku.eq(sku))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, DomainError> {
        let count = products::Entity::find()
            .filter(products::Column::Sku.eq(sku))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(name_contains(name))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::Category.eq(category))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::Brand.eq(brand))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_active(&self) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::Status.eq(ProductStatus::Active.to_string()))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_low_stock(&self) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::MinQuantity.gt(0))
            .filter(
                Expr::col(products::Column::Quantity)
                    .lte(Expr::col(products::Column::MinQuantity)),
            )
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_quantity(&self, quantity: i32) -> Result<Vec<Product>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::Quantity.eq(quantity))
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all(
        &self,
        page_index: u64,
        page_size: u64,
        sort_field: ProductSortField,
        direction: SortDirection,
    ) -> Result<(Vec<Product>, u64), DomainError> {
        let order = match direction {
            SortDirection::Ascending => Order::Asc,
            SortDirection::Descending => Order::Desc,
        };

        let paginator = products::Entity::find()
            .order_by(sort_column(sort_field), order)
            .paginate(&self.db, page_size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let models = paginator
            .fetch_page(page_index)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((models.into_iter().map(|m| m.into()).collect(), total))
    }

    async fn search(
        &self,
        filter: &ProductFilter,
        page_index: u64,
        page_size: u64,
    ) -> Result<(Vec<Product>, u64), DomainError> {
        let mut condition = Condition::all();
        if let Some(name) = &filter.name {
            condition = condition.add(name_contains(name));
        }
        if let Some(category) = &filter.category {
            condition = condition.add(products::Column::Category.eq(category));
        }
        if let Some(brand) = &filter.brand {
            condition = condition.add(products::Column::Brand.eq(brand));
        }
        if let Some(min_price) = filter.min_price {
            condition = condition.add(products::Column::Price.gte(min_price));
        }
        if let Some(max_price) = filter.max_price {
            condition = condition.add(products::Column::Price.lte(max_price));
        }
        if let Some(min_quantity) = filter.min_quantity {
            condition = condition.add(products::Column::Quantity.gte(min_quantity));
        }

        let paginator = products::Entity::find()
            .filter(condition)
            .order_by_asc(products::Column::Id)
            .paginate(&self.db, page_size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let models = paginator
            .fetch_page(page_index)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((models.into_iter().map(|m| m.into()).collect(), total))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let taken = products::Entity::find()
            .filter(products::Column::Sku.eq(&product.sku))
            .count(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        if taken > 0 {
            return Err(duplicate_sku(&product.sku));
        }

        let now = Utc::now().fixed_offset();
        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            sku: Set(product.sku.clone()),
            price: Set(product.price),
            quantity: Set(product.quantity),
            min_quantity: Set(product.min_quantity),
            category: Set(product.category.clone()),
            brand: Set(product.brand.clone()),
            unit: Set(product.unit.clone()),
            status: Set(ProductStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique index backs the in-transaction check
        let inserted = model.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_sku(&product.sku),
            _ => DomainError::Database(e.to_string()),
        })?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(inserted.into())
    }

    async fn update(
        &self,
        id: &ProductId,
        changes: &UpdateProduct,
    ) -> Result<Product, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let existing = products::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| product_not_found(id))?;

        if changes.sku != existing.sku {
            let taken = products::Entity::find()
                .filter(products::Column::Sku.eq(&changes.sku))
                .count(&txn)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            if taken > 0 {
                return Err(duplicate_sku(&changes.sku));
            }
        }

        let mut model = existing.into_active_model();
        model.name = Set(changes.name.clone());
        model.description = Set(changes.description.clone());
        model.sku = Set(changes.sku.clone());
        model.price = Set(changes.price);
        model.quantity = Set(changes.quantity);
        model.min_quantity = Set(changes.min_quantity);
        model.category = Set(changes.category.clone());
        model.brand = Set(changes.brand.clone());
        model.unit = Set(changes.unit.clone());
        model.status = Set(changes.status.to_string());
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = model.update(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_sku(&changes.sku),
            _ => DomainError::Database(e.to_string()),
        })?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(updated.into())
    }

    async fn update_status(
        &self,
        id: &ProductId,
        status: ProductStatus,
    ) -> Result<(), DomainError> {
        let result = products::ActiveModel {
            id: Set(id.0),
            status: Set(status.to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(product_not_found(id)),
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }

    async fn adjust_quantity(&self, id: &ProductId, delta: i32) -> Result<Product, DomainError> {
        // Single conditional UPDATE: the quantity check and the write cannot
        // be split by a concurrent adjustment
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "UPDATE products SET quantity = quantity + $1, updated_at = NOW() \
             WHERE id = $2 AND quantity + $1 >= 0",
            [delta.into(), id.0.into()],
        );

        let result = self
            .db
            .execute(stmt)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(id).await? {
                None => Err(product_not_found(id)),
                Some(product) => Err(DomainError::InsufficientStock {
                    available: product.quantity,
                    requested: -delta,
                }),
            };
        }

        self.find_by_id(id).await?.ok_or_else(|| product_not_found(id))
    }

    async fn set_quantity(&self, id: &ProductId, quantity: i32) -> Result<Product, DomainError> {
        let result = products::ActiveModel {
            id: Set(id.0),
            quantity: Set(quantity),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await;

        match result {
            Ok(updated) => Ok(updated.into()),
            Err(DbErr::RecordNotUpdated) => Err(product_not_found(id)),
            Err(e) => Err(DomainError::Database(e.to_string())),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = products::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(product_not_found(id));
        }
        Ok(())
    }

    async fn total_inventory_value(&self) -> Result<Decimal, DomainError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT COALESCE(SUM(price * quantity), 0) AS total FROM products",
            [],
        );

        let row = self
            .db
            .query_one(stmt)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        match row {
            Some(row) => row
                .try_get::<Decimal>("", "total")
                .map_err(|e| DomainError::Database(e.to_string())),
            None => Ok(Decimal::ZERO),
        }
    }

    async fn count_by_category(&self) -> Result<Vec<CategoryCount>, DomainError> {
        // NULLIF folds empty labels into the NULL (uncategorized) group
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT NULLIF(category, '') AS category, COUNT(*) AS count \
             FROM products GROUP BY NULLIF(category, '') \
             ORDER BY NULLIF(category, '')",
            [],
        );

        let rows = self
            .db
            .query_all(stmt)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|row| {
                let category: Option<String> = row
                    .try_get("", "category")
                    .map_err(|e| DomainError::Database(e.to_string()))?;
                let count: i64 = row
                    .try_get("", "count")
                    .map_err(|e| DomainError::Database(e.to_string()))?;
                Ok(CategoryCount {
                    category,
                    count: count as u64,
                })
            })
            .collect()
    }
}
