pub mod repository;
pub mod service;

pub use repository::{todo_filter, TodoRepository, TODO_NOT_FOUND};
pub use service::{CreateTodo, TodoService};
