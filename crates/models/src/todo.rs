use sea_orm::{entity::prelude::*, ActiveValue::NotSet, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, patch::Patch};

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(t: &str) -> Result<(), errors::ModelError> {
    if t.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    if t.chars().count() > TITLE_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("title longer than {TITLE_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_description(d: &str) -> Result<(), errors::ModelError> {
    if d.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("description longer than {DESCRIPTION_MAX_LEN} characters")));
    }
    Ok(())
}

/// Fields of a todo about to be inserted; the id is assigned by the database.
#[derive(Clone, Debug)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl NewTodo {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_title(&self.title)?;
        if let Some(d) = &self.description { validate_description(d)?; }
        Ok(())
    }
}

impl IntoActiveModel<ActiveModel> for NewTodo {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            title: Set(self.title),
            description: Set(self.description),
            completed: Set(self.completed),
            created_at: Set(self.created_at),
            updated_at: Set(None),
        }
    }
}

/// Partial update of a todo. `updated_at` is stamped by the service, never by clients.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    #[serde(skip)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl TodoPatch {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if let Some(t) = &self.title { validate_title(t)?; }
        if let Some(d) = &self.description { validate_description(d)?; }
        Ok(())
    }
}

impl Patch<ActiveModel> for TodoPatch {
    fn apply(self, am: &mut ActiveModel) {
        if let Some(t) = self.title { am.title = Set(t); }
        if let Some(d) = self.description { am.description = Set(Some(d)); }
        if let Some(c) = self.completed { am.completed = Set(c); }
        if let Some(ts) = self.updated_at { am.updated_at = Set(Some(ts)); }
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none() && self.updated_at.is_none()
    }
}
