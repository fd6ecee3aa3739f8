use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::ServiceConfig;
use service::service_context::ServiceContextService;
use service::todo::{repository::todo_repository, TodoService};

/// Everything a handler needs, wired once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub todos: Arc<TodoService>,
    pub service_context: Arc<ServiceContextService>,
    pub config: Arc<ServiceConfig>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, config: ServiceConfig) -> Self {
        let todos = TodoService::new(todo_repository(db.clone(), config.default_per_page));
        let service_context = ServiceContextService::new(db);
        Self {
            todos: Arc::new(todos),
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }
}
