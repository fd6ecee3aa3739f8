use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub maintenance: bool }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct TodoDoc {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// `{total, page, per_page, items}`; `?itemized=true` drops everything but `items`.
#[derive(ToSchema)]
pub struct TodoListingDoc {
    pub total: Option<u64>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub items: Vec<TodoDoc>,
}

#[derive(ToSchema)]
pub struct CreateTodoDoc {
    pub title: String,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(ToSchema)]
pub struct UpdateTodoDoc {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(ToSchema)]
pub struct ServiceContextDoc { pub id: i32, pub maintenance: bool }

#[derive(ToSchema)]
pub struct UpdateServiceContextDoc { pub maintenance: Option<bool> }

#[derive(ToSchema)]
pub struct DeletedCountDoc { pub deleted: u64 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::status,
        crate::routes::todo::create,
        crate::routes::todo::list,
        crate::routes::todo::delete_all,
        crate::routes::todo::retrieve,
        crate::routes::todo::update,
        crate::routes::todo::delete,
        crate::routes::service_context::retrieve,
        crate::routes::service_context::update,
        crate::routes::service_context::activate,
        crate::routes::service_context::deactivate,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            MessageResponse,
            TodoDoc,
            TodoListingDoc,
            CreateTodoDoc,
            UpdateTodoDoc,
            ServiceContextDoc,
            UpdateServiceContextDoc,
            DeletedCountDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "todo"),
        (name = "service-context")
    )
)]
pub struct ApiDoc;
