//! api-server — HTTP API for the catalog workspace.
//!
//! Exposes CRUD endpoints for books and users over an in-memory store:
//! - Books: POST/GET /api/books, GET/PUT/DELETE /api/books/:id
//! - Users: POST/GET /api/users, GET/PUT/DELETE /api/users/:id
//! - Health: GET /health
//!
//! Storage is in-memory; data lives for the lifetime of the process.
//! CORS is configurable via CORS_ALLOW_ORIGIN (origin string) for frontends.
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional
//! cargo run -p api-server
//!
//! # JSON logs on a custom port
//! LOG_FORMAT=json PORT=8080 cargo run -p api-server
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.
//!

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use domain::adapters::memory_repo::InMemoryRepository;
use domain::id::UuidGenerator;
use domain::service::EntityService;
use domain::{Book, BookDraft, CoreError, User, UserDraft};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type BookService = EntityService<InMemoryRepository<Book>, UuidGenerator>;
type UserService = EntityService<InMemoryRepository<User>, UuidGenerator>;

#[derive(Clone)]
struct AppState {
    books: Arc<BookService>,
    users: Arc<UserService>,
}

impl AppState {
    /// Wire fresh in-memory repositories into the two services.
    fn new() -> Self {
        Self {
            books: Arc::new(EntityService::new(
                InMemoryRepository::new(),
                UuidGenerator::new(),
            )),
            users: Arc::new(EntityService::new(
                InMemoryRepository::new(),
                UuidGenerator::new(),
            )),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);

    let state = AppState::new();
    let mut app = build_router(state);

    // CORS - already validated in Config::from_env()
    let cors = if cfg.cors_allow_origin == HeaderValue::from_static("*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([cfg.cors_allow_origin]))
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };
    app = app.layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(%addr, "api-server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind port");
    axum::serve(listener, app).await.expect("server error");
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

fn build_router(state: AppState) -> Router {
    // Request ID header name
    let x_request_id = axum::http::HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(health))
        .route("/api/books", axum::routing::post(create_book).get(list_books))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/users", axum::routing::post(create_user).get(list_users))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .with_state(state)
}

// Missing JSON fields default to empty strings so the service layer, not the
// deserializer, rejects them with a field-specific message.
#[derive(Deserialize)]
struct CreateBookReq {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
}

#[derive(Deserialize)]
struct UpdateBookReq {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
}

#[derive(Deserialize)]
struct CreateUserReq {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
struct UpdateUserReq {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

/// Map a domain failure onto the wire: validation to 400, absent ids to 404,
/// duplicate ids to 409, storage failures to 500.
fn error_response(op: &'static str, err: CoreError) -> Response {
    match &err {
        CoreError::MissingField(_) => {
            warn!(%err, op, "invalid request");
            (
                StatusCode::BAD_REQUEST,
                Json(http_common::json_error_with_message(
                    "invalid_request",
                    &err.to_string(),
                )),
            )
                .into_response()
        }
        CoreError::NotFound => {
            warn!(op, "not found");
            (
                StatusCode::NOT_FOUND,
                Json(http_common::json_err("not_found")),
            )
                .into_response()
        }
        CoreError::AlreadyExists => {
            warn!(op, "conflict");
            (
                StatusCode::CONFLICT,
                Json(http_common::json_err("conflict")),
            )
                .into_response()
        }
        CoreError::Repository(_) => {
            error!(%err, op, "repository failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(http_common::json_err("internal")),
            )
                .into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "OK"}))
}

async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<CreateBookReq>,
) -> Response {
    match state.books.create(BookDraft {
        title: body.title,
        author: body.author,
    }) {
        Ok(book) => {
            info!(id = %book.id, "book created");
            (StatusCode::CREATED, Json(book)).into_response()
        }
        Err(e) => error_response("create_book", e),
    }
}

async fn list_books(State(state): State<AppState>) -> Response {
    match state.books.list() {
        Ok(books) => Json(books).into_response(),
        Err(e) => error_response("list_books", e),
    }
}

async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.books.get(&id) {
        Ok(book) => Json(book).into_response(),
        Err(e) => error_response("get_book", e),
    }
}

async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBookReq>,
) -> Response {
    match state.books.update(
        &id,
        BookDraft {
            title: body.title,
            author: body.author,
        },
    ) {
        Ok(book) => {
            info!(id = %book.id, "book updated");
            Json(book).into_response()
        }
        Err(e) => error_response("update_book", e),
    }
}

async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.books.delete(&id) {
        Ok(()) => {
            info!(%id, "book deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response("delete_book", e),
    }
}

async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserReq>,
) -> Response {
    match state.users.create(UserDraft {
        name: body.name,
        email: body.email,
    }) {
        Ok(user) => {
            info!(id = %user.id, "user created");
            (StatusCode::CREATED, Json(user)).into_response()
        }
        Err(e) => error_response("create_user", e),
    }
}

async fn list_users(State(state): State<AppState>) -> Response {
    match state.users.list() {
        Ok(users) => Json(users).into_response(),
        Err(e) => error_response("list_users", e),
    }
}

async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.users.get(&id) {
        Ok(user) => Json(user).into_response(),
        Err(e) => error_response("get_user", e),
    }
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserReq>,
) -> Response {
    match state.users.update(
        &id,
        UserDraft {
            name: body.name,
            email: body.email,
        },
    ) {
        Ok(user) => {
            info!(id = %user.id, "user updated");
            Json(user).into_response()
        }
        Err(e) => error_response("update_user", e),
    }
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.users.delete(&id) {
        Ok(()) => {
            info!(%id, "user deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response("delete_user", e),
    }
}
