//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lendshelf API",
        version = "0.1.0",
        description = "Book catalog with rental and purchase"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        auth::register,
        auth::login,
        books::list_books,
        books::get_book,
        books::apply_action,
    ),
    components(
        schemas(
            crate::models::Credentials,
            auth::RegisterResponse,
            auth::LoginResponse,
            crate::models::Book,
            crate::models::BookAction,
            books::ActionResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "books", description = "Catalog, rental and purchase")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
