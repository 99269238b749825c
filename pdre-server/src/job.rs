//! Calculation runs.
//!
//! The layer between storage and the pure engine: a run for one protected
//! area loads its active objects, aggregates them, writes the per-object
//! fields and the area total back, and keeps a history record of the run.

use chrono::Utc;
use tracing::{error, info, warn};

use crate::aggregate::{AreaEntry, compute_area};
use crate::calculator::compute;
use crate::domain::{AreaId, AreaReport, CalculationPeriod, CapacityResult, ObjectId};
use crate::store::{AreaSource, CalculationRecord, ProtectedArea, ResultSink, StoreError};

/// Method label stored with every area total.
pub const CALCULATION_METHOD: &str = "methodology_1809";

/// Errors from a calculation run.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// The area id does not resolve to a stored area
    #[error("protected area {0} not found")]
    AreaNotFound(AreaId),

    /// The object id does not resolve to a stored object
    #[error("tourism object {0} not found")]
    ObjectNotFound(ObjectId),

    /// Reading or writing records failed
    #[error("storage error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for JobError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AreaNotFound(id) => JobError::AreaNotFound(id),
            StoreError::ObjectNotFound(id) => JobError::ObjectNotFound(id),
            other => JobError::Store(other),
        }
    }
}

/// Run a full calculation for one protected area.
///
/// An unknown area is rejected before any history record is opened. Runs
/// for the same area are serialised, so the stored total always matches
/// the stored object results of a single run.
///
/// Returns the completed history record. If persisting fails part-way, the
/// record is stored as failed and any object results written before the
/// failure are left in place.
pub async fn run_area_calculation<S>(
    store: &S,
    area_id: AreaId,
    period: CalculationPeriod,
) -> Result<CalculationRecord, JobError>
where
    S: AreaSource + ResultSink,
{
    let area = store.area(area_id).await?;
    let _guard = store.lock_area(area.id).await;

    info!(area_id = %area.id, period = %period, "starting capacity calculation");

    let mut record = store.begin_calculation(area.id, period, Utc::now()).await?;

    match calculate_and_persist(store, &area, period).await {
        Ok(report) => {
            info!(
                area_id = %area.id,
                objects = report.len(),
                total = report.total_permissible,
                "capacity calculation completed"
            );
            record.complete(report, Utc::now());
            store.finish_calculation(&record).await?;
            Ok(record)
        }
        Err(e) => {
            error!(area_id = %area.id, error = %e, "capacity calculation failed");
            record.fail(e.to_string(), Utc::now());
            if let Err(store_err) = store.finish_calculation(&record).await {
                warn!(calculation = record.id, error = %store_err, "could not mark calculation failed");
            }
            Err(e)
        }
    }
}

async fn calculate_and_persist<S>(
    store: &S,
    area: &ProtectedArea,
    period: CalculationPeriod,
) -> Result<AreaReport, JobError>
where
    S: AreaSource + ResultSink,
{
    let objects = store.active_objects(area.id).await?;

    let entries: Vec<AreaEntry> = objects
        .iter()
        .map(|o| AreaEntry::new(o.id, o.name.clone(), o.capacity_inputs(period.days())))
        .collect();

    let report = compute_area(&entries);

    for object in &report.objects {
        store
            .save_object_result(object.object_id, &object.result)
            .await?;
    }
    store
        .save_area_total(area.id, report.total_permissible, CALCULATION_METHOD, Utc::now())
        .await?;

    Ok(report)
}

/// Recalculate and store a single object.
///
/// Waits for any running calculation of the object's area to finish.
pub async fn recalculate_object<S>(
    store: &S,
    object_id: ObjectId,
    period: CalculationPeriod,
) -> Result<CapacityResult, JobError>
where
    S: AreaSource + ResultSink,
{
    let object = store.object(object_id).await?;
    let _guard = store.lock_area(object.area_id).await;

    let result = compute(&object.capacity_inputs(period.days()));
    store.save_object_result(object.id, &result).await?;

    info!(
        object_id = %object.id,
        permissible = result.permissible_capacity,
        "object recalculated"
    );
    Ok(result)
}
