// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use plan_staffing_api::{
    ApiError, AssignmentResponse, CreatePlanResponse, ListAssignmentsQuery, PlanDetailsResponse,
    PlanProcedureRequest, PlanProcedureUserRequest, ProcedureResponse, UserResponse,
    WriteResponse, add_procedure_to_plan, assign_user, clear_users, create_plan,
    get_plan_details, list_assignments, list_procedures, list_users, remove_procedure,
    unassign_user,
};
use plan_staffing_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Plan Staffing Server - HTTP server for assigning staff to plan procedures
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load a small demo catalog of procedures and users on startup
    #[arg(long)]
    seed_demo: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence adapter, serialised behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// Root cancellation token. Cancelled when the server shuts down.
    shutdown: CancellationToken,
}

impl AppState {
    fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token for a single request, cancelled together with the server.
    fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/api/plan`.
async fn handle_create_plan(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CreatePlanResponse>, HttpError> {
    info!("Handling create_plan request");

    let cancel: CancellationToken = app_state.request_token();
    let mut persistence = app_state.persistence.lock().await;
    let response: CreatePlanResponse = create_plan(&mut persistence, &cancel)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/plan/add-procedure`.
async fn handle_add_procedure_to_plan(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlanProcedureRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        plan_id = req.plan_id,
        procedure_id = req.procedure_id,
        "Handling add_procedure_to_plan request"
    );

    let cancel: CancellationToken = app_state.request_token();
    let mut persistence = app_state.persistence.lock().await;
    let response: WriteResponse = add_procedure_to_plan(&mut persistence, &req, &cancel)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/procedures`.
async fn handle_list_procedures(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ProcedureResponse>>, HttpError> {
    info!("Handling list_procedures request");

    let mut persistence = app_state.persistence.lock().await;
    let procedures: Vec<ProcedureResponse> = list_procedures(&mut persistence)?;
    drop(persistence);

    Ok(Json(procedures))
}

/// Handler for GET `/api/users`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<UserResponse>>, HttpError> {
    info!("Handling list_users request");

    let mut persistence = app_state.persistence.lock().await;
    let users: Vec<UserResponse> = list_users(&mut persistence)?;
    drop(persistence);

    Ok(Json(users))
}

/// Handler for GET `/api/plan-procedure`.
///
/// Lists user assignments, optionally filtered by `planId`.
async fn handle_list_assignments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListAssignmentsQuery>,
) -> Result<Json<Vec<AssignmentResponse>>, HttpError> {
    info!(plan_id = ?query.plan_id, "Handling list_assignments request");

    let mut persistence = app_state.persistence.lock().await;
    let assignments: Vec<AssignmentResponse> = list_assignments(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(assignments))
}

/// Handler for GET `/api/plan-procedure/{plan_id}`.
async fn handle_get_plan_details(
    AxumState(app_state): AxumState<AppState>,
    Path(plan_id): Path<i64>,
) -> Result<Json<PlanDetailsResponse>, HttpError> {
    info!(plan_id, "Handling get_plan_details request");

    let mut persistence = app_state.persistence.lock().await;
    let details: PlanDetailsResponse = get_plan_details(&mut persistence, plan_id)?;
    drop(persistence);

    Ok(Json(details))
}

/// Handler for POST `/api/plan-procedure/assign-user`.
async fn handle_assign_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlanProcedureUserRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        plan_id = req.plan_id,
        procedure_id = req.procedure_id,
        user_id = req.user_id,
        "Handling assign_user request"
    );

    let cancel: CancellationToken = app_state.request_token();
    let mut persistence = app_state.persistence.lock().await;
    let response: WriteResponse = assign_user(&mut persistence, &req, &cancel)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/plan-procedure/unassign-user`.
async fn handle_unassign_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlanProcedureUserRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        plan_id = req.plan_id,
        procedure_id = req.procedure_id,
        user_id = req.user_id,
        "Handling unassign_user request"
    );

    let cancel: CancellationToken = app_state.request_token();
    let mut persistence = app_state.persistence.lock().await;
    let response: WriteResponse = unassign_user(&mut persistence, &req, &cancel)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/plan-procedure/clear-users`.
async fn handle_clear_users(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlanProcedureRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        plan_id = req.plan_id,
        procedure_id = req.procedure_id,
        "Handling clear_users request"
    );

    let cancel: CancellationToken = app_state.request_token();
    let mut persistence = app_state.persistence.lock().await;
    let response: WriteResponse = clear_users(&mut persistence, &req, &cancel)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/plan-procedure/remove-procedure`.
async fn handle_remove_procedure(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlanProcedureRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        plan_id = req.plan_id,
        procedure_id = req.procedure_id,
        "Handling remove_procedure request"
    );

    let cancel: CancellationToken = app_state.request_token();
    let mut persistence = app_state.persistence.lock().await;
    let response: WriteResponse = remove_procedure(&mut persistence, &req, &cancel)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/plan", post(handle_create_plan))
        .route("/api/plan/add-procedure", post(handle_add_procedure_to_plan))
        .route("/api/procedures", get(handle_list_procedures))
        .route("/api/users", get(handle_list_users))
        .route("/api/plan-procedure", get(handle_list_assignments))
        .route("/api/plan-procedure/{plan_id}", get(handle_get_plan_details))
        .route("/api/plan-procedure/assign-user", post(handle_assign_user))
        .route(
            "/api/plan-procedure/unassign-user",
            post(handle_unassign_user),
        )
        .route("/api/plan-procedure/clear-users", post(handle_clear_users))
        .route(
            "/api/plan-procedure/remove-procedure",
            post(handle_remove_procedure),
        )
        .with_state(app_state)
}

/// Resolves once Ctrl+C is received or the token is cancelled elsewhere,
/// and cancels the token so in-flight commands stop before committing.
async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                shutdown.cancelled().await;
            }
        },
        () = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}

fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed_demo {
        info!("Seeding demo catalog");
        persistence.seed_demo_catalog()?;
    }

    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Plan Staffing Server");

    let persistence: Persistence = open_persistence(&args).inspect_err(|e| {
        error!(error = %e, "Failed to initialize persistence");
    })?;

    let app_state: AppState = AppState::new(persistence);
    let shutdown: CancellationToken = app_state.shutdown.clone();

    // Build router
    let app: Router = build_router(app_state.clone());

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    app_state.persistence.lock().await.close();
    info!("Server stopped");

    Ok(())
}
