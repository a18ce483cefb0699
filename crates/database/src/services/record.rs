use crate::{error::RecordError, validate::Validate};
use log::{debug, info};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, Iterable, PaginatorTrait,
    PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::LikeExpr,
};
use serde::de::DeserializeOwned;
use std::fmt::Display;

/// The primary key value of an entity
pub type KeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Registration of an entity with the record administration surface
#[async_trait::async_trait]
pub trait Record: EntityTrait {
    /// Registry name, used as the URL segment
    const NAME: &'static str;
    const VERBOSE_NAME: &'static str;

    /// Fields accepted when creating or editing a record
    type Form: DeserializeOwned + Send;
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Validate + Send + Sync;

    /// Text columns matched by the list search
    fn search_columns() -> Vec<Self::Column>;

    /// Builds the row to write. A `key` overrides whatever key the form carries.
    fn into_active_model(form: Self::Form, key: Option<KeyOf<Self>>) -> Self::Active;

    /// Fails with [`RecordError::MissingReference`] if a referenced row doesn't exist
    async fn check_references(
        txn: &DatabaseTransaction,
        active: &Self::Active,
    ) -> Result<(), RecordError>;

    /// Cascades to or detaches the rows that depend on `model`, ahead of its deletion
    async fn release(txn: &DatabaseTransaction, model: &Self::Model) -> Result<(), DbErr>;

    /// Human-readable rendering, used in listings and relationship pickers
    async fn display(db: &DatabaseConnection, model: &Self::Model) -> Result<String, DbErr>;
}

/// Fails with [`RecordError::MissingReference`] unless a row of `E` with `key` exists
pub async fn ensure_exists<E>(txn: &DatabaseTransaction, key: KeyOf<E>) -> Result<(), RecordError>
where
    E: Record,
    KeyOf<E>: Display,
{
    let label = key.to_string();

    match E::find_by_id(key).one(txn).await? {
        Some(_) => Ok(()),
        None => Err(RecordError::MissingReference {
            entity: E::VERBOSE_NAME,
            key: label,
        }),
    }
}

/// Escapes `LIKE` wildcards so a search term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub struct RecordService;

impl RecordService {
    /// Returns one page of records (1-based) ordered by primary key, and the
    /// total number of records matching `search`
    pub async fn list<E>(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<(Vec<E::Model>, u64), DbErr>
    where
        E: Record,
        E::Model: Sync,
    {
        let mut query = E::find();

        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            let columns = E::search_columns();
            if !columns.is_empty() {
                let pattern = format!("%{}%", escape_like(term));
                let condition = columns
                    .into_iter()
                    .fold(Condition::any(), |condition, column| {
                        condition.add(column.like(LikeExpr::new(pattern.as_str()).escape('\\')))
                    });
                query = query.filter(condition);
            }
        }

        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }

        let per_page = per_page.max(1);
        let page_index = page.max(1) - 1;
        let total_items = query.clone().count(db).await?;

        // Pages whose offset doesn't fit a SQL OFFSET can't hold any rows
        let in_range = page_index
            .checked_mul(per_page)
            .is_some_and(|offset| offset <= i64::MAX as u64);
        if !in_range {
            return Ok((Vec::new(), total_items));
        }

        let paginator = query.paginate(db, per_page);
        let records = paginator.fetch_page(page_index).await?;

        debug!(
            "Listed {} of {} {} records",
            records.len(),
            total_items,
            E::VERBOSE_NAME
        );

        Ok((records, total_items))
    }

    pub async fn get<E>(db: &DatabaseConnection, key: KeyOf<E>) -> Result<E::Model, RecordError>
    where
        E: Record,
        KeyOf<E>: Display,
    {
        let label = key.to_string();

        E::find_by_id(key)
            .one(db)
            .await?
            .ok_or(RecordError::NotFound {
                entity: E::VERBOSE_NAME,
                key: label,
            })
    }

    /// Validates the form, checks its references, and inserts it
    pub async fn create<E>(db: &DatabaseConnection, form: E::Form) -> Result<E::Model, RecordError>
    where
        E: Record,
        E::Model: IntoActiveModel<E::Active>,
    {
        let active = E::into_active_model(form, None);
        active.validate()?;

        let txn = db.begin().await?;
        E::check_references(&txn, &active).await?;
        let model = active.insert(&txn).await?;
        txn.commit().await?;

        info!("Created {}", E::VERBOSE_NAME);
        Ok(model)
    }

    /// Replaces every field of an existing record. The primary key is not changed.
    pub async fn update<E>(
        db: &DatabaseConnection,
        key: KeyOf<E>,
        form: E::Form,
    ) -> Result<E::Model, RecordError>
    where
        E: Record,
        E::Model: IntoActiveModel<E::Active>,
        KeyOf<E>: Clone + Display,
    {
        let txn = db.begin().await?;

        if E::find_by_id(key.clone()).one(&txn).await?.is_none() {
            return Err(RecordError::NotFound {
                entity: E::VERBOSE_NAME,
                key: key.to_string(),
            });
        }

        let label = key.to_string();
        let active = E::into_active_model(form, Some(key));
        active.validate()?;

        E::check_references(&txn, &active).await?;
        let model = active.update(&txn).await?;
        txn.commit().await?;

        info!("Updated {} {}", E::VERBOSE_NAME, label);
        Ok(model)
    }

    /// Deletes a record after cascading to or detaching its dependents
    pub async fn delete<E>(db: &DatabaseConnection, key: KeyOf<E>) -> Result<(), RecordError>
    where
        E: Record,
        KeyOf<E>: Clone + Display,
    {
        let txn = db.begin().await?;

        let Some(model) = E::find_by_id(key.clone()).one(&txn).await? else {
            return Err(RecordError::NotFound {
                entity: E::VERBOSE_NAME,
                key: key.to_string(),
            });
        };

        E::release(&txn, &model).await?;
        E::delete_by_id(key.clone()).exec(&txn).await?;
        txn.commit().await?;

        info!("Deleted {} {}", E::VERBOSE_NAME, key);
        Ok(())
    }

    pub async fn display<E: Record>(
        db: &DatabaseConnection,
        model: &E::Model,
    ) -> Result<String, DbErr> {
        E::display(db, model).await
    }
}
