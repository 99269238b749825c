//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::aggregate::{AreaEntry, compute_area};
use crate::calculator::compute;
use crate::domain::{AreaId, AreaReport, CalculationPeriod, CapacityResult, ObjectId};
use crate::job::{self, JobError};
use crate::store::{AreaSource, CalculationRecord, ResultSink, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/capacity/object", post(object_capacity))
        .route("/capacity/area", post(area_capacity))
        .route("/areas", get(list_areas))
        .route("/areas/:id", put(put_area))
        .route("/areas/:id/objects", get(area_objects))
        .route("/areas/:id/calculate", post(calculate_area))
        .route("/areas/:id/calculations", get(calculation_history))
        .route("/objects/:id", put(put_object))
        .route("/objects/:id/recalculate", post(recalculate_object))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Compute one object from posted parameters. Nothing is stored.
async fn object_capacity(
    Json(req): Json<CapacityInputsRequest>,
) -> Result<Json<CapacityResult>, AppError> {
    let inputs = req.into_inputs()?;
    Ok(Json(compute(&inputs)))
}

/// Aggregate a posted list of objects. Nothing is stored.
async fn area_capacity(
    Json(req): Json<Vec<AreaEntryRequest>>,
) -> Result<Json<AreaReport>, AppError> {
    let entries = req
        .into_iter()
        .map(AreaEntryRequest::into_entry)
        .collect::<Result<Vec<AreaEntry>, _>>()?;
    Ok(Json(compute_area(&entries)))
}

/// List every protected area.
async fn list_areas(State(state): State<AppState>) -> Json<Vec<AreaView>> {
    let areas = state.store.areas().await;
    Json(areas.iter().map(AreaView::from_area).collect())
}

/// Create or rename a protected area.
async fn put_area(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<AreaRequest>,
) -> Json<AreaView> {
    let id = AreaId(id);
    let existing = state.store.area(id).await.ok();
    let area = req.into_area(id, existing);
    state.store.upsert_area(area.clone()).await;
    Json(AreaView::from_area(&area))
}

/// Create or replace a tourism object.
async fn put_object(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<ObjectRequest>,
) -> Result<Json<ObjectView>, AppError> {
    let object = req.into_object(ObjectId(id))?;

    let _guard = state.store.lock_area(object.area_id).await;
    state.store.upsert_object(object.clone()).await?;
    Ok(Json(ObjectView::from_object(&object)))
}

/// List the active objects of an area.
async fn area_objects(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<ObjectView>>, AppError> {
    let objects = state.store.active_objects(AreaId(id)).await?;
    Ok(Json(objects.iter().map(ObjectView::from_object).collect()))
}

/// Run and store a full area calculation.
async fn calculate_area(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Option<Json<CalculateRequest>>,
) -> Result<Json<CalculationRecord>, AppError> {
    let period = resolve_period(body.map(|Json(b)| b), state.config.default_period)?;
    let record = job::run_area_calculation(&*state.store, AreaId(id), period).await?;

    if let Some(path) = &state.config.snapshot_path
        && let Err(e) = state.store.save_json_file(path).await
    {
        warn!(path = %path.display(), error = %e, "failed to write store snapshot");
    }

    Ok(Json(record))
}

/// Calculation history of an area, newest first.
async fn calculation_history(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<CalculationRecord>>, AppError> {
    let records = state.store.calculations(AreaId(id)).await?;
    Ok(Json(records))
}

/// Recalculate and store a single object.
async fn recalculate_object(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Option<Json<CalculateRequest>>,
) -> Result<Json<CapacityResult>, AppError> {
    let period = resolve_period(body.map(|Json(b)| b), state.config.default_period)?;
    let result = job::recalculate_object(&*state.store, ObjectId(id), period).await?;
    Ok(Json(result))
}

/// Pick the requested period, or the configured default.
fn resolve_period(
    req: Option<CalculateRequest>,
    default: CalculationPeriod,
) -> Result<CalculationPeriod, AppError> {
    match req.and_then(|r| r.calculation_period) {
        Some(label) => CalculationPeriod::parse(&label).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<InvalidInput> for AppError {
    fn from(e: InvalidInput) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AreaNotFound(_)
            | StoreError::ObjectNotFound(_)
            | StoreError::CalculationNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<JobError> for AppError {
    fn from(e: JobError) -> Self {
        match e {
            JobError::AreaNotFound(_) | JobError::ObjectNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            JobError::Store(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::domain::{ObjectKind, RouteKind};
    use crate::store::{CalculationStatus, Dataset, MemoryStore, ProtectedArea, TourismObject};

    fn state() -> AppState {
        let mut meadow = TourismObject::new(
            ObjectId(1),
            AreaId(1),
            "Meadow",
            ObjectKind::Areal,
            RouteKind::DayTrip,
        );
        meadow.area_sq_m = Some(1000.0);

        let store = MemoryStore::new(Dataset {
            areas: vec![ProtectedArea::new(AreaId(1), "Lake park")],
            objects: vec![meadow],
            calculations: Vec::new(),
        });
        AppState::new(store, ServerConfig::default())
    }

    #[test]
    fn period_defaults_and_parses() {
        assert_eq!(
            resolve_period(None, CalculationPeriod::Week).unwrap(),
            CalculationPeriod::Week
        );
        assert_eq!(
            resolve_period(Some(CalculateRequest::default()), CalculationPeriod::Month).unwrap(),
            CalculationPeriod::Month
        );

        let req = CalculateRequest {
            calculation_period: Some("year".to_string()),
        };
        assert_eq!(
            resolve_period(Some(req), CalculationPeriod::Month).unwrap(),
            CalculationPeriod::Year
        );

        let req = CalculateRequest {
            calculation_period: Some("decade".to_string()),
        };
        assert!(matches!(
            resolve_period(Some(req), CalculationPeriod::Month),
            Err(AppError::BadRequest { .. })
        ));
    }

    #[test]
    fn error_status_codes() {
        let resp = AppError::from(JobError::AreaNotFound(AreaId(5))).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::from(StoreError::ObjectNotFound(ObjectId(5))).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::BadRequest {
            message: "bad".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(JobError::Store(StoreError::CalculationNotFound(1))).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn calculate_area_handler() {
        let state = state();

        let Json(record) = calculate_area(State(state.clone()), Path(1), None)
            .await
            .unwrap();
        assert_eq!(record.status, CalculationStatus::Completed);
        assert_eq!(record.total_permissible, Some(9600.0));

        let Json(history) = calculation_history(State(state), Path(1)).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn calculate_unknown_area_is_not_found() {
        let result = calculate_area(State(state()), Path(42), None).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn object_capacity_handler() {
        let req: CapacityInputsRequest =
            serde_json::from_str(r#"{"object_kind": "areal", "area_sq_m": 1000.0}"#).unwrap();

        let Json(result) = object_capacity(Json(req)).await.unwrap();
        assert_eq!(result.base_capacity, 12000.0);
        assert_eq!(result.permissible_capacity, 9600.0);
    }

    #[tokio::test]
    async fn area_capacity_rejects_bad_kind() {
        let req: Vec<AreaEntryRequest> = serde_json::from_str(
            r#"[{"id": 1, "name": "X", "inputs": {"object_kind": "blob"}}]"#,
        )
        .unwrap();

        let result = area_capacity(Json(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn put_area_creates_and_updates() {
        let state = state();

        let req: AreaRequest = serde_json::from_str(r#"{"name": "Pine ridge"}"#).unwrap();
        let Json(view) = put_area(State(state.clone()), Path(2), Json(req)).await;
        assert_eq!(view.id, AreaId(2));
        assert_eq!(view.name, "Pine ridge");

        let req: AreaRequest =
            serde_json::from_str(r#"{"name": "Pine ridge reserve", "area_ha": 80.0}"#).unwrap();
        put_area(State(state.clone()), Path(2), Json(req)).await;

        let Json(areas) = list_areas(State(state)).await;
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1].name, "Pine ridge reserve");
        assert_eq!(areas[1].area_ha, 80.0);
    }

    #[tokio::test]
    async fn put_object_then_calculate() {
        let state = state();

        let req: ObjectRequest = serde_json::from_str(
            r#"{"area_id": 1, "name": "Pond", "object_kind": "areal", "area_sq_m": 500.0}"#,
        )
        .unwrap();
        let Json(view) = put_object(State(state.clone()), Path(2), Json(req))
            .await
            .unwrap();
        assert_eq!(view.id, ObjectId(2));
        assert!(view.capacity.is_none());

        let Json(objects) = area_objects(State(state.clone()), Path(1)).await.unwrap();
        assert_eq!(objects.len(), 2);

        // Meadow 9600 + pond 4800
        let Json(record) = calculate_area(State(state), Path(1), None).await.unwrap();
        assert_eq!(record.total_permissible, Some(14400.0));
    }

    #[tokio::test]
    async fn put_object_into_unknown_area_is_not_found() {
        let req: ObjectRequest = serde_json::from_str(
            r#"{"area_id": 9, "name": "Pond", "object_kind": "areal"}"#,
        )
        .unwrap();

        let result = put_object(State(state()), Path(2), Json(req)).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn put_object_rejects_bad_kind() {
        let req: ObjectRequest = serde_json::from_str(
            r#"{"area_id": 1, "name": "Pond", "object_kind": "blob"}"#,
        )
        .unwrap();

        let result = put_object(State(state()), Path(2), Json(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn recalculate_object_handler() {
        let state = state();
        let body = Some(Json(CalculateRequest {
            calculation_period: Some("day".to_string()),
        }));

        let Json(result) = recalculate_object(State(state.clone()), Path(1), body)
            .await
            .unwrap();
        // 1000 / 10 * 4 * 1 * 0.8
        assert_eq!(result.permissible_capacity, 320.0);

        let Json(objects) = area_objects(State(state), Path(1)).await.unwrap();
        assert_eq!(objects[0].capacity, Some(result));
    }
}
