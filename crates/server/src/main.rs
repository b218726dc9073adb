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
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use airfis_api::{
    ApiError, FlightListQuery,
    handlers::{
        bulk_update, delete_flight, flight_events, gate_occupancy, get_flight, list_flights,
        sync_flight, update_baggage_belt, update_belt_status, update_gate, update_gate_status,
        update_status, webhook_status_update,
    },
    request_response::{
        BulkUpdateRequest, BulkUpdateResponse, DeleteFlightResponse, FlightDetails,
        FlightEventsResponse, FlightListResponse, FlightSyncRequest, FlightSyncResponse,
        GateOccupancyResponse, ResourceStatusRequest, ResourceStatusResponse, StatusUpdateRequest,
        UpdateBeltRequest, UpdateGateRequest, UpdateStatusRequest,
    },
};
use airfis_domain::IataCode;
use airfis_persistence::Persistence;

/// AirFIS Server - HTTP server for the airport Flight Information System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IATA code of the airport this installation serves (e.g. MNL).
    /// Flights are classified as arrivals or departures relative to it.
    #[arg(long)]
    home_airport: String,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex to allow safe concurrent
/// access; the home airport is fixed at startup.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for flights, topology, and event timelines.
    persistence: Arc<Mutex<Persistence>>,
    /// The airport this installation serves.
    home_airport: IataCode,
}

/// Query parameters for the flight listing endpoint.
#[derive(Debug, Default, Deserialize)]
struct ListFlightsQuery {
    /// `arrival` or `departure`.
    role: Option<String>,
    /// Calendar day (`YYYY-MM-DD`) of the scheduled departure.
    date: Option<String>,
    /// Substring match on number, airline, origin, or destination.
    search: Option<String>,
    /// Include soft-deleted flights.
    #[serde(default)]
    include_deleted: bool,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Query parameters for the gate occupancy endpoint.
#[derive(Debug, Deserialize)]
struct OccupancyQuery {
    /// Window start (RFC 3339).
    from: String,
    /// Window end (RFC 3339).
    to: String,
}

/// Response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Status indicator, always `ok` while the server is up.
    status: String,
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
        let status = match &err {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::IntegrationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/webhook/flight-sync` endpoint.
///
/// Upserts one flight from the upstream feed. Responds 201 when the
/// payload created the flight, 200 when it merged into an existing one.
async fn handle_flight_sync(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<FlightSyncRequest>,
) -> Result<(StatusCode, Json<FlightSyncResponse>), HttpError> {
    info!(
        external_ref = req.external_ref.as_deref().unwrap_or("-"),
        flight_number = req.flight_number.as_deref().unwrap_or("-"),
        "Handling flight-sync request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightSyncResponse = sync_flight(&mut persistence, &req)?;
    drop(persistence);

    let status = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// Handler for POST `/webhook/status-update` endpoint.
///
/// Sets a flight's status from the upstream feed.
async fn handle_status_update(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<FlightDetails>, HttpError> {
    info!(
        status = req.status_code.as_deref().unwrap_or("-"),
        "Handling status-update request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightDetails =
        webhook_status_update(&mut persistence, &req, &app_state.home_airport)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/flights/{id}/status` endpoint.
async fn handle_update_status(
    AxumState(app_state): AxumState<AppState>,
    Path(flight_id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<FlightDetails>, HttpError> {
    info!(flight_id, status = %req.status, "Handling status change request");

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightDetails = update_status(
        &mut persistence,
        flight_id,
        &req.status,
        &app_state.home_airport,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/flights/{id}/gate` endpoint.
///
/// A `null` or absent gate clears the assignment.
async fn handle_update_gate(
    AxumState(app_state): AxumState<AppState>,
    Path(flight_id): Path<i64>,
    Json(req): Json<UpdateGateRequest>,
) -> Result<Json<FlightDetails>, HttpError> {
    info!(
        flight_id,
        gate = req.gate.as_deref().unwrap_or("-"),
        "Handling gate change request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightDetails = update_gate(
        &mut persistence,
        flight_id,
        req.gate.as_deref(),
        &app_state.home_airport,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/flights/{id}/baggage-belt` endpoint.
///
/// A `null` or absent belt clears the assignment.
async fn handle_update_belt(
    AxumState(app_state): AxumState<AppState>,
    Path(flight_id): Path<i64>,
    Json(req): Json<UpdateBeltRequest>,
) -> Result<Json<FlightDetails>, HttpError> {
    info!(
        flight_id,
        baggage_belt = req.baggage_belt.as_deref().unwrap_or("-"),
        "Handling belt change request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightDetails = update_baggage_belt(
        &mut persistence,
        flight_id,
        req.baggage_belt.as_deref(),
        &app_state.home_airport,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/flights/bulk-update` endpoint.
///
/// Applies one change across many flights; per-flight failures are
/// reported in the response body, not as an HTTP error.
async fn handle_bulk_update(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkUpdateRequest>,
) -> Result<Json<BulkUpdateResponse>, HttpError> {
    info!(flights = req.flight_ids.len(), "Handling bulk update request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BulkUpdateResponse =
        bulk_update(&mut persistence, &req, &app_state.home_airport)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/flights/{id}` endpoint.
async fn handle_delete_flight(
    AxumState(app_state): AxumState<AppState>,
    Path(flight_id): Path<i64>,
) -> Result<Json<DeleteFlightResponse>, HttpError> {
    info!(flight_id, "Handling flight delete request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteFlightResponse = delete_flight(&mut persistence, flight_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/gates/{id}/status` endpoint.
///
/// The path segment accepts any gate reference form, including the
/// canonical `{terminal_id}-{code}`.
async fn handle_gate_status(
    AxumState(app_state): AxumState<AppState>,
    Path(gate_ref): Path<String>,
    Json(req): Json<ResourceStatusRequest>,
) -> Result<Json<ResourceStatusResponse>, HttpError> {
    info!(gate = %gate_ref, status = %req.status, "Handling gate status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ResourceStatusResponse =
        update_gate_status(&mut persistence, &gate_ref, &req.status)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/baggage-belts/{id}/status` endpoint.
async fn handle_belt_status(
    AxumState(app_state): AxumState<AppState>,
    Path(belt_ref): Path<String>,
    Json(req): Json<ResourceStatusRequest>,
) -> Result<Json<ResourceStatusResponse>, HttpError> {
    info!(belt = %belt_ref, status = %req.status, "Handling belt status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ResourceStatusResponse =
        update_belt_status(&mut persistence, &belt_ref, &req.status)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/flights` endpoint.
///
/// Lists flights with role classification and connection annotations.
async fn handle_list_flights(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ListFlightsQuery>,
) -> Result<Json<FlightListResponse>, HttpError> {
    info!(
        role = params.role.as_deref().unwrap_or("-"),
        date = params.date.as_deref().unwrap_or("-"),
        "Handling list flights request"
    );

    let query = FlightListQuery {
        role: params.role,
        date: params.date,
        search: params.search,
        include_deleted: params.include_deleted,
        limit: params.limit,
        offset: params.offset,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightListResponse =
        list_flights(&mut persistence, &query, &app_state.home_airport)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/flights/{id}` endpoint.
async fn handle_get_flight(
    AxumState(app_state): AxumState<AppState>,
    Path(flight_id): Path<i64>,
) -> Result<Json<FlightDetails>, HttpError> {
    info!(flight_id, "Handling get flight request");

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightDetails =
        get_flight(&mut persistence, flight_id, &app_state.home_airport)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/flights/{id}/events` endpoint.
///
/// Returns the flight's event timeline, oldest first.
async fn handle_flight_events(
    AxumState(app_state): AxumState<AppState>,
    Path(flight_id): Path<i64>,
) -> Result<Json<FlightEventsResponse>, HttpError> {
    info!(flight_id, "Handling flight events request");

    let mut persistence = app_state.persistence.lock().await;
    let response: FlightEventsResponse = flight_events(&mut persistence, flight_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/gates/{id}/occupancy` endpoint.
async fn handle_gate_occupancy(
    AxumState(app_state): AxumState<AppState>,
    Path(gate_ref): Path<String>,
    Query(params): Query<OccupancyQuery>,
) -> Result<Json<GateOccupancyResponse>, HttpError> {
    info!(gate = %gate_ref, from = %params.from, to = %params.to, "Handling occupancy request");

    let mut persistence = app_state.persistence.lock().await;
    let response: GateOccupancyResponse =
        gate_occupancy(&mut persistence, &gate_ref, &params.from, &params.to)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/webhook/flight-sync", post(handle_flight_sync))
        .route("/webhook/status-update", post(handle_status_update))
        .route("/flights", get(handle_list_flights))
        .route("/flights/bulk-update", post(handle_bulk_update))
        .route("/flights/{id}", get(handle_get_flight))
        .route("/flights/{id}", delete(handle_delete_flight))
        .route("/flights/{id}/status", post(handle_update_status))
        .route("/flights/{id}/gate", post(handle_update_gate))
        .route("/flights/{id}/baggage-belt", post(handle_update_belt))
        .route("/flights/{id}/events", get(handle_flight_events))
        .route("/gates/{id}/status", post(handle_gate_status))
        .route("/gates/{id}/occupancy", get(handle_gate_occupancy))
        .route("/baggage-belts/{id}/status", post(handle_belt_status))
        .route("/health", get(handle_health))
        .with_state(app_state)
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

    info!("Initializing AirFIS Server");

    let home_airport: IataCode = IataCode::new(&args.home_airport)?;
    info!("Home airport: {}", home_airport.value());

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        home_airport,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
