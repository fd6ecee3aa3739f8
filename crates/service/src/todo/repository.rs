use sea_orm::{ColumnTrait, Condition, DatabaseConnection};

use models::todo;

use crate::query::{get_query_param, QueryParams};
use crate::repository::Repository;

pub const TODO_NOT_FOUND: &str = "The requested todo was not found";

pub type TodoRepository = Repository<todo::Entity>;

/// `title` matches the raw spelling exactly, `completed` only when it is a real boolean.
pub fn todo_filter(params: &QueryParams) -> Condition {
    let mut cond = Condition::all();
    if let Some(title) = params.raw("title") {
        cond = cond.add(todo::Column::Title.eq(title));
    }
    if let Some(done) = get_query_param(Some(params), "completed", None).and_then(|v| v.as_flag()) {
        cond = cond.add(todo::Column::Completed.eq(done));
    }
    cond
}

pub fn todo_repository(db: DatabaseConnection, default_per_page: u32) -> TodoRepository {
    Repository::new(db, todo_filter, TODO_NOT_FOUND).with_default_per_page(default_per_page)
}
