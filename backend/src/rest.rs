//! Axum handlers for the HTTP API.
//!
//! Handlers translate between the wire DTOs in `shared` and the domain
//! services: lookup misses become 404, validation failures 400, storage
//! faults 500.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::{
    ActiveChildResponse, BirthCardResponse, Card, ChildListResponse, ChildResponse,
    CreateChildRequest, DeleteChildResponse, ReadingListResponse, SaveReadingResponse,
    UpdateChildRequest,
};
use std::sync::Arc;
use tracing::info;

use crate::domain::cards::{birth_card_for_date, resolve_yearly_forecast, ForecastRecord, PlanetaryPeriod};
use crate::domain::commands::child::{
    CreateChildCommand, DeleteChildCommand, GetChildCommand, SetActiveChildCommand,
    UpdateChildCommand,
};
use crate::domain::commands::reading::{
    ComputeReadingCommand, ListReadingsCommand, SaveReadingCommand,
};
use crate::domain::models::child::Child as DomainChild;
use crate::domain::models::reading::Reading as DomainReading;
use crate::Backend;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<Backend>,
}

impl AppState {
    /// Create new application state wrapping the backend services
    pub fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }
}

/// Build the API router with all routes mounted under /api
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/cards/birth-card", get(get_birth_card))
        .route("/cards/forecast", get(get_forecast))
        .route("/children", get(list_children).post(create_child))
        .route("/children/active", get(get_active_child))
        .route(
            "/children/:child_id",
            get(get_child).put(update_child).delete(delete_child),
        )
        .route("/children/:child_id/activate", post(set_active_child))
        .route("/children/:child_id/reading", get(get_reading))
        .route(
            "/children/:child_id/readings",
            get(list_readings).post(save_reading),
        );

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Query parameters for the birth card lookup endpoint
#[derive(Deserialize, Debug)]
pub struct BirthCardQuery {
    /// ISO 8601 date (YYYY-MM-DD); the year is ignored for the lookup
    pub date: String,
}

/// Query parameters for the forecast lookup endpoint
#[derive(Deserialize, Debug)]
pub struct ForecastQuery {
    /// Birth card in either notation (e.g. "5♦" or "5D")
    pub card: String,
    pub age: u32,
}

/// Axum handler for GET /api/cards/birth-card
pub async fn get_birth_card(Query(query): Query<BirthCardQuery>) -> impl IntoResponse {
    info!("GET /api/cards/birth-card - date: {}", query.date);

    let date = match NaiveDate::parse_from_str(&query.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid date '{}', expected YYYY-MM-DD", query.date),
            )
                .into_response()
        }
    };

    match birth_card_for_date(date) {
        Some(entry) => (
            StatusCode::OK,
            Json(BirthCardResponse {
                card: entry.card.to_string(),
                card_name: entry.card_name.clone(),
            }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("No card found for {}", query.date),
        )
            .into_response(),
    }
}

/// Axum handler for GET /api/cards/forecast
pub async fn get_forecast(Query(query): Query<ForecastQuery>) -> impl IntoResponse {
    info!("GET /api/cards/forecast - card: {}, age: {}", query.card, query.age);

    let card = match Card::parse(&query.card) {
        Ok(card) => card,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match resolve_yearly_forecast(card, query.age) {
        Some(forecast) => (StatusCode::OK, Json(forecast_to_dto(&forecast))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("No forecast found for {} at age {}", card, query.age),
        )
            .into_response(),
    }
}

/// Axum handler for POST /api/children
pub async fn create_child(
    State(state): State<AppState>,
    Json(request): Json<CreateChildRequest>,
) -> impl IntoResponse {
    info!("POST /api/children - name: {}", request.name);

    let command = CreateChildCommand {
        name: request.name,
        birthdate: request.birthdate,
    };

    match state.backend.child_service.create_child(command) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ChildResponse {
                success_message: format!("Child '{}' created successfully", result.child.name),
                child: child_to_dto(&result.child),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error creating child: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for GET /api/children
pub async fn list_children(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children");

    match state.backend.child_service.list_children() {
        Ok(result) => (
            StatusCode::OK,
            Json(ChildListResponse {
                children: result.children.iter().map(child_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error listing children: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing children").into_response()
        }
    }
}

/// Axum handler for GET /api/children/:child_id
pub async fn get_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}", child_id);

    match state.backend.child_service.get_child(GetChildCommand { child_id }) {
        Ok(result) => match result.child {
            Some(child) => (StatusCode::OK, Json(child_to_dto(&child))).into_response(),
            None => (StatusCode::NOT_FOUND, "Child not found").into_response(),
        },
        Err(e) => {
            tracing::error!("Error getting child: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error getting child").into_response()
        }
    }
}

/// Axum handler for PUT /api/children/:child_id
pub async fn update_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
    Json(request): Json<UpdateChildRequest>,
) -> impl IntoResponse {
    info!("PUT /api/children/{}", child_id);

    let command = UpdateChildCommand {
        child_id,
        name: request.name,
        birthdate: request.birthdate,
    };

    match state.backend.child_service.update_child(command) {
        Ok(result) => (
            StatusCode::OK,
            Json(ChildResponse {
                success_message: format!("Child '{}' updated successfully", result.child.name),
                child: child_to_dto(&result.child),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error updating child: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for DELETE /api/children/:child_id (soft delete)
pub async fn delete_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/children/{}", child_id);

    match state.backend.child_service.delete_child(DeleteChildCommand { child_id }) {
        Ok(result) => (
            StatusCode::OK,
            Json(DeleteChildResponse {
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error deleting child: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for POST /api/children/:child_id/activate
pub async fn set_active_child(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/children/{}/activate", child_id);

    match state
        .backend
        .child_service
        .set_active_child(SetActiveChildCommand { child_id })
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ActiveChildResponse {
                active_child: Some(child_to_dto(&result.child)),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error setting active child: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for GET /api/children/active
pub async fn get_active_child(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/children/active");

    match state.backend.child_service.get_active_child() {
        Ok(result) => (
            StatusCode::OK,
            Json(ActiveChildResponse {
                active_child: result.active_child.child.as_ref().map(child_to_dto),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error getting active child: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error getting active child").into_response()
        }
    }
}

/// Axum handler for GET /api/children/:child_id/reading
pub async fn get_reading(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/reading", child_id);

    let command = ComputeReadingCommand {
        child_id,
        today: Local::now().date_naive(),
    };

    match state.backend.reading_service.compute_reading(command) {
        Ok(result) => (StatusCode::OK, Json(reading_to_dto(&result.reading))).into_response(),
        Err(e) => {
            tracing::error!("Error computing reading: {:?}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
    }
}

/// Axum handler for POST /api/children/:child_id/readings
pub async fn save_reading(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/children/{}/readings", child_id);

    let command = SaveReadingCommand {
        child_id,
        today: Local::now().date_naive(),
    };

    match state.backend.reading_service.save_reading(command) {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SaveReadingResponse {
                success_message: result.success_message,
                reading: reading_to_dto(&result.reading),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error saving reading: {:?}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Axum handler for GET /api/children/:child_id/readings
pub async fn list_readings(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/children/{}/readings", child_id);

    match state
        .backend
        .reading_service
        .list_readings(ListReadingsCommand { child_id })
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ReadingListResponse {
                readings: result.readings.iter().map(reading_to_dto).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error listing readings: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing readings").into_response()
        }
    }
}

// DTO mappers

fn child_to_dto(child: &DomainChild) -> shared::Child {
    shared::Child {
        id: child.id.clone(),
        name: child.name.clone(),
        birthdate: child.birthdate.format("%Y-%m-%d").to_string(),
        created_at: child.created_at.to_rfc3339(),
        updated_at: child.updated_at.to_rfc3339(),
        is_active: child.is_active,
    }
}

fn forecast_to_dto(forecast: &ForecastRecord) -> shared::YearlyForecast {
    let text = |card: Option<Card>| card.map(|card| card.to_string());
    shared::YearlyForecast {
        birth_card: forecast.birth_card.to_string(),
        age: forecast.age,
        mercury: text(forecast.mercury),
        venus: text(forecast.venus),
        mars: text(forecast.mars),
        jupiter: text(forecast.jupiter),
        saturn: text(forecast.saturn),
        uranus: text(forecast.uranus),
        neptune: text(forecast.neptune),
        long_range: text(forecast.long_range),
        pluto: text(forecast.pluto),
        result: text(forecast.result),
        support: text(forecast.support),
        development: text(forecast.development),
    }
}

fn period_to_dto(period: &PlanetaryPeriod) -> shared::PlanetaryPeriod {
    shared::PlanetaryPeriod {
        planet: period.planet.name().to_string(),
        card: period.card.map(|card| card.to_string()),
        start_date: period.start_date.format("%Y-%m-%d").to_string(),
        end_date: period.end_date.format("%Y-%m-%d").to_string(),
        is_current: period.is_current,
    }
}

fn reading_to_dto(reading: &DomainReading) -> shared::Reading {
    shared::Reading {
        id: reading.id.clone(),
        child_id: reading.child_id.clone(),
        birth_card: reading.birth_card.map(|card| card.to_string()),
        card_name: reading.card_name.clone(),
        age: reading.age,
        forecast: reading.forecast.as_ref().map(forecast_to_dto),
        periods: reading.periods.iter().map(period_to_dto).collect(),
        computed_at: reading.computed_at.to_rfc3339(),
    }
}
