use sea_orm::{entity::prelude::*, sea_query::OnConflict, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, patch::Patch};

/// The only id the `service_context` table ever holds.
pub const SINGLETON_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_context")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub maintenance: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceContextPatch {
    pub maintenance: Option<bool>,
}

impl Patch<ActiveModel> for ServiceContextPatch {
    fn apply(self, am: &mut ActiveModel) {
        if let Some(m) = self.maintenance { am.maintenance = Set(m); }
    }

    fn is_empty(&self) -> bool { self.maintenance.is_none() }
}

fn db_err(e: DbErr) -> errors::ModelError { errors::ModelError::Db(e.to_string()) }

/// Return the singleton row, inserting it with `maintenance = false` first if needed.
///
/// Concurrent first readers race on the insert; `ON CONFLICT DO NOTHING` lets
/// the loser fall through to the re-read.
pub async fn get_or_create<C: ConnectionTrait>(db: &C) -> Result<Model, errors::ModelError> {
    if let Some(found) = Entity::find_by_id(SINGLETON_ID).one(db).await.map_err(db_err)? {
        return Ok(found);
    }
    let am = ActiveModel { id: Set(SINGLETON_ID), maintenance: Set(false) };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
        .map_err(db_err)?;
    Entity::find_by_id(SINGLETON_ID)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| errors::ModelError::Db("service_context row missing after insert".into()))
}

/// Apply `patch` to the singleton row, creating it first if absent.
pub async fn update<C: ConnectionTrait>(db: &C, patch: ServiceContextPatch) -> Result<Model, errors::ModelError> {
    let current = get_or_create(db).await?;
    if patch.is_empty() {
        return Ok(current);
    }
    let mut am = current.into_active_model();
    patch.apply(&mut am);
    am.update(db).await.map_err(db_err)
}
