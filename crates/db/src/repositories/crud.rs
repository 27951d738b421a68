//! Generic CRUD repository over a `SeaORM` entity.
//!
//! Every operation runs in its own transaction: committed on success, rolled
//! back when the transaction is dropped on an error path.

use std::fmt;
use std::marker::PhantomData;

use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    IdenStatic, IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

/// Primary key value type of an entity.
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Error types for CRUD operations.
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    /// The requested page holds no records.
    #[error("No records in the requested range")]
    EmptyPage,

    /// No record with the given primary key.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Insert or update violated a uniqueness constraint.
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// Any other database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CrudError {
    /// Classify an error raised by a write.
    fn from_write(err: DbErr) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict(err.to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// Returns true if the error reports a uniqueness violation.
///
/// The driver's structured error code is authoritative; the message text is
/// only consulted when the driver gives none.
pub fn is_unique_violation(err: &DbErr) -> bool {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => true,
        Some(_) => false,
        None => err
            .to_string()
            .to_lowercase()
            .contains("unique constraint"),
    }
}

/// CRUD repository parameterized by entity.
pub struct CrudRepository<E> {
    db: DatabaseConnection,
    entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for CrudRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudRepository")
            .field("entity", &std::any::type_name::<E>())
            .finish_non_exhaustive()
    }
}

impl<E> CrudRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    PrimaryKeyOf<E>: Clone,
{
    /// Create a new repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    /// List records ordered by primary key.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPage` when the range is empty.
    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<E::Model>, CrudError> {
        let txn = self.db.begin().await?;

        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }
        let rows = query.offset(skip).limit(limit).all(&txn).await?;
        txn.commit().await?;

        if rows.is_empty() {
            return Err(CrudError::EmptyPage);
        }
        Ok(rows)
    }

    /// Find a record by primary key.
    pub async fn get_by_id(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Model>, CrudError> {
        let txn = self.db.begin().await?;
        let model = E::find_by_id(id).one(&txn).await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Find the first record matching a condition.
    pub async fn find_one<F>(&self, condition: F) -> Result<Option<E::Model>, CrudError>
    where
        F: IntoCondition,
    {
        let txn = self.db.begin().await?;
        let model = E::find().filter(condition).one(&txn).await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Insert a record and return it as persisted.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` on a uniqueness violation.
    pub async fn create(&self, model: E::ActiveModel) -> Result<E::Model, CrudError> {
        let txn = self.db.begin().await?;
        let created = model.insert(&txn).await.map_err(CrudError::from_write)?;
        txn.commit().await?;
        Ok(created)
    }

    /// Apply the `Set` columns of `patch` to an existing record.
    ///
    /// Primary key columns in the patch are ignored. A patch without `Set`
    /// columns returns the current record untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist, `Conflict` on a
    /// uniqueness violation.
    pub async fn update(
        &self,
        id: PrimaryKeyOf<E>,
        patch: E::ActiveModel,
    ) -> Result<E::Model, CrudError> {
        let txn = self.db.begin().await?;

        let current = E::find_by_id(id.clone())
            .one(&txn)
            .await?
            .ok_or_else(|| CrudError::NotFound(format!("{id:?}")))?;

        let mut active = current.clone().into_active_model();
        let mut changed = false;
        for column in E::Column::iter() {
            if is_primary_key::<E>(column) {
                continue;
            }
            if let ActiveValue::Set(value) = patch.get(column) {
                active.set(column, value);
                changed = true;
            }
        }

        if !changed {
            txn.commit().await?;
            return Ok(current);
        }

        let updated = active.update(&txn).await.map_err(CrudError::from_write)?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Delete a record by primary key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist.
    pub async fn delete(&self, id: PrimaryKeyOf<E>) -> Result<bool, CrudError> {
        let txn = self.db.begin().await?;

        if E::find_by_id(id.clone()).one(&txn).await?.is_none() {
            return Err(CrudError::NotFound(format!("{id:?}")));
        }

        E::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(true)
    }
}

fn is_primary_key<E: EntityTrait>(column: E::Column) -> bool {
    E::PrimaryKey::iter().any(|key| key.into_column().as_str() == column.as_str())
}
