use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use models::todo::{self, NewTodo, TodoPatch};

use crate::errors::ServiceError;
use crate::pagination::Listing;
use crate::query::QueryParams;
use crate::todo::repository::TodoRepository;

/// Client-supplied fields of a new todo.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Todo business rules: validation and timestamps. Storage goes through the repository.
#[derive(Clone)]
pub struct TodoService {
    repo: TodoRepository,
}

impl TodoService {
    pub fn new(repo: TodoRepository) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, input: CreateTodo) -> Result<todo::Model, ServiceError> {
        let new = NewTodo {
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: Utc::now().into(),
        };
        new.validate()?;
        let created = self.repo.create(new).await?;
        info!(id = created.id, "todo created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<todo::Model, ServiceError> { self.repo.get(id).await }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, mut patch: TodoPatch) -> Result<todo::Model, ServiceError> {
        patch.validate()?;
        patch.updated_at = Some(Utc::now().into());
        let updated = self.repo.update(id, patch).await?;
        info!(id, "todo updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<todo::Model, ServiceError> {
        let removed = self.repo.delete(id).await?;
        info!(id, "todo deleted");
        Ok(removed)
    }

    #[instrument(skip(self, params))]
    pub async fn delete_all(&self, params: Option<&QueryParams>) -> Result<u64, ServiceError> {
        let removed = self.repo.delete_all(params).await?;
        info!(removed, "todos deleted");
        Ok(removed)
    }

    pub async fn get_all(&self, params: Option<&QueryParams>) -> Result<Listing<todo::Model>, ServiceError> {
        self.repo.get_all(params).await
    }

    pub async fn exists(&self, params: Option<&QueryParams>) -> Result<bool, ServiceError> {
        self.repo.exists(params).await
    }

    pub async fn find(&self, params: Option<&QueryParams>) -> Result<todo::Model, ServiceError> {
        self.repo.find(params).await
    }

    pub async fn count(&self, params: Option<&QueryParams>) -> Result<u64, ServiceError> {
        self.repo.count(params).await
    }
}
