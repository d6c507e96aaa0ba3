//! OpenAPI documentation configuration.
//!
//! The generated document is served at `/api-docs/openapi.json`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Security scheme for protected routes (bearer token only).
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearer_token".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Access token obtained from `POST /token`. Include it in the `Authorization` header:\n\n\
                            ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "taskd", description = "A small todo service with password login and bearer tokens"),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::users::read_current_user,
        api::handlers::todos::create_todo,
        api::handlers::todos::list_todos,
        api::handlers::todos::get_todo,
        api::handlers::todos::update_todo,
        api::handlers::todos::delete_todo,
        api::handlers::system::health,
    ),
    components(schemas(
        api::models::users::UserCreate,
        api::models::users::UserResponse,
        api::models::auth::LoginRequest,
        api::models::auth::TokenResponse,
        api::models::todos::TodoCreate,
        api::models::todos::TodoUpdate,
        api::models::todos::TodoResponse,
    )),
    tags(
        (name = "users", description = "Registration, login, and identity"),
        (name = "todos", description = "Owner-gated todo CRUD"),
        (name = "system", description = "Service health"),
    )
)]
pub struct ApiDoc;
