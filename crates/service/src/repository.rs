//! Generic resource repository.
//!
//! One [`Repository`] per entity: CRUD, filtered listing, and the paging vs.
//! itemizing decision. The only resource-specific input is a [`FilterFn`]
//! turning normalized query parameters into a `WHERE` condition, so a new
//! resource plugs in predicates without touching the paging policy.
//!
//! Every mutation runs in its own transaction. On a storage error the
//! transaction is rolled back, the cause is logged, and a
//! [`ServiceError::Persistence`] with a generic message is returned.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityName, EntityTrait, IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};
use tracing::{debug, error};

use models::patch::Patch;

use crate::errors::ServiceError;
use crate::pagination::{is_itemized, Listing, Pagination, DEFAULT_PER_PAGE};
use crate::query::QueryParams;

/// Builds the `WHERE` condition for a resource from its query parameters.
pub type FilterFn = fn(&QueryParams) -> Condition;

pub struct Repository<E: EntityTrait> {
    db: DatabaseConnection,
    filter: FilterFn,
    not_found_message: &'static str,
    default_per_page: u32,
    table: String,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            filter: self.filter,
            not_found_message: self.not_found_message,
            default_per_page: self.default_per_page,
            table: self.table.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    pub fn new(db: DatabaseConnection, filter: FilterFn, not_found_message: &'static str) -> Self {
        Self {
            db,
            filter,
            not_found_message,
            default_per_page: DEFAULT_PER_PAGE,
            table: E::default().table_name().to_string(),
            _entity: PhantomData,
        }
    }

    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page.max(1);
        self
    }

    pub fn db(&self) -> &DatabaseConnection { &self.db }

    fn condition(&self, params: Option<&QueryParams>) -> Condition {
        match params {
            Some(p) => (self.filter)(p),
            None => Condition::all(),
        }
    }

    /// Filtered select, ordered by primary key so pages are stable.
    fn select(&self, params: Option<&QueryParams>) -> Select<E> {
        let mut select = E::find().filter(self.condition(params));
        for key in E::PrimaryKey::iter() {
            select = select.order_by_asc(key.into_column());
        }
        select
    }

    fn not_found(&self) -> ServiceError {
        ServiceError::NotFound(self.not_found_message.to_string())
    }

    fn read_error(&self, message: &'static str, err: DbErr) -> ServiceError {
        error!(table = %self.table, error = %err, "{message}");
        ServiceError::Persistence(message.to_string())
    }

    /// Roll back `txn` and turn `err` into the generic persistence error.
    async fn abort(&self, txn: DatabaseTransaction, message: &'static str, err: DbErr) -> ServiceError {
        error!(table = %self.table, error = %err, "{message}");
        self.release(txn).await;
        ServiceError::Persistence(message.to_string())
    }

    /// Roll back without masking the caller's error; a failed rollback is only logged.
    async fn release(&self, txn: DatabaseTransaction) {
        if let Err(rollback_err) = txn.rollback().await {
            error!(table = %self.table, error = %rollback_err, "rollback failed");
        }
    }

    async fn begin(&self, message: &'static str) -> Result<DatabaseTransaction, ServiceError> {
        self.db.begin().await.map_err(|e| self.read_error(message, e))
    }

    async fn commit(&self, txn: DatabaseTransaction, message: &'static str) -> Result<(), ServiceError> {
        txn.commit().await.map_err(|e| self.read_error(message, e))
    }

    async fn fetch<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<E::Model, ServiceError> {
        E::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| self.read_error("Error getting object", e))?
            .ok_or_else(|| self.not_found())
    }

    pub async fn create<D>(&self, data: D) -> Result<E::Model, ServiceError>
    where
        D: IntoActiveModel<E::ActiveModel>,
    {
        const MSG: &str = "Error creating object";
        let txn = self.begin(MSG).await?;
        match data.into_active_model().insert(&txn).await {
            Ok(created) => {
                self.commit(txn, MSG).await?;
                debug!(table = %self.table, "row created");
                Ok(created)
            }
            Err(e) => Err(self.abort(txn, MSG, e).await),
        }
    }

    pub async fn get(&self, id: i32) -> Result<E::Model, ServiceError> {
        self.fetch(&self.db, id).await
    }

    /// Partial update: only the fields present in `patch` are written.
    pub async fn update<P>(&self, id: i32, patch: P) -> Result<E::Model, ServiceError>
    where
        P: Patch<E::ActiveModel>,
    {
        const MSG: &str = "Error updating object";
        let txn = self.begin(MSG).await?;
        let current = match self.fetch(&txn, id).await {
            Ok(found) => found,
            Err(e) => {
                self.release(txn).await;
                return Err(e);
            }
        };
        if patch.is_empty() {
            self.commit(txn, MSG).await?;
            return Ok(current);
        }
        let mut active = current.into_active_model();
        patch.apply(&mut active);
        match active.update(&txn).await {
            Ok(updated) => {
                self.commit(txn, MSG).await?;
                Ok(updated)
            }
            Err(e) => Err(self.abort(txn, MSG, e).await),
        }
    }

    /// Delete by id and hand back the removed row.
    pub async fn delete(&self, id: i32) -> Result<E::Model, ServiceError> {
        const MSG: &str = "Error deleting object";
        let txn = self.begin(MSG).await?;
        let current = match self.fetch(&txn, id).await {
            Ok(found) => found,
            Err(e) => {
                self.release(txn).await;
                return Err(e);
            }
        };
        match E::delete_by_id(id).exec(&txn).await {
            Ok(_) => {
                self.commit(txn, MSG).await?;
                Ok(current)
            }
            Err(e) => Err(self.abort(txn, MSG, e).await),
        }
    }

    /// Delete every row matching `params` in one statement.
    ///
    /// `None` is refused up front so a missing query string can never wipe the table.
    pub async fn delete_all(&self, params: Option<&QueryParams>) -> Result<u64, ServiceError> {
        const MSG: &str = "Error deleting all objects";
        let Some(params) = params else {
            return Err(ServiceError::Validation("Query parameters are required".into()));
        };
        let txn = self.begin(MSG).await?;
        match E::delete_many().filter((self.filter)(params)).exec(&txn).await {
            Ok(res) => {
                self.commit(txn, MSG).await?;
                debug!(table = %self.table, rows = res.rows_affected, "rows deleted");
                Ok(res.rows_affected)
            }
            Err(e) => Err(self.abort(txn, MSG, e).await),
        }
    }

    /// Filtered listing: every row when itemized, otherwise one page.
    pub async fn get_all(&self, params: Option<&QueryParams>) -> Result<Listing<E::Model>, ServiceError> {
        const MSG: &str = "Error getting all objects";
        let select = self.select(params);

        if is_itemized(params) {
            let items = select.all(&self.db).await.map_err(|e| self.read_error(MSG, e))?;
            return Ok(Listing::Itemized { items });
        }

        let (page_index, per_page) = Pagination::from_query(params, self.default_per_page).normalize();
        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(|e| self.read_error(MSG, e))?;
        let items = paginator.fetch_page(page_index).await.map_err(|e| self.read_error(MSG, e))?;
        Ok(Listing::Page { total, page: page_index + 1, per_page, items })
    }

    pub async fn exists(&self, params: Option<&QueryParams>) -> Result<bool, ServiceError> {
        let found = self
            .select(params)
            .one(&self.db)
            .await
            .map_err(|e| self.read_error("Error checking if object exists", e))?;
        Ok(found.is_some())
    }

    /// First match in primary-key order.
    pub async fn find(&self, params: Option<&QueryParams>) -> Result<E::Model, ServiceError> {
        self.select(params)
            .one(&self.db)
            .await
            .map_err(|e| self.read_error("Error finding object", e))?
            .ok_or_else(|| self.not_found())
    }

    pub async fn count(&self, params: Option<&QueryParams>) -> Result<u64, ServiceError> {
        E::find()
            .filter(self.condition(params))
            .count(&self.db)
            .await
            .map_err(|e| self.read_error("Error counting objects", e))
    }
}
