//! Storage collaborators.
//!
//! The capacity engine itself never touches storage. These traits are the
//! narrow seams the calculation job uses to read object parameters and
//! write results back, so the job can be exercised against the in-memory
//! store in tests and in the server alike.

mod error;
mod memory;
mod records;

use chrono::{DateTime, Utc};
use tokio::sync::OwnedMutexGuard;

pub use error::StoreError;
pub use memory::{Dataset, MemoryStore};
pub use records::{
    CalculationRecord, CalculationStatus, ProtectedArea, ROUTE_SEGMENTS_KEY, TourismObject,
};

use crate::domain::{AreaId, CalculationPeriod, CapacityResult, ObjectId};

/// Supplies protected areas and their tourism objects.
#[allow(async_fn_in_trait)]
pub trait AreaSource {
    /// Look up a protected area.
    async fn area(&self, id: AreaId) -> Result<ProtectedArea, StoreError>;

    /// Active objects of an area, in stored order.
    ///
    /// Fails with [`StoreError::AreaNotFound`] if the area does not exist.
    async fn active_objects(&self, area: AreaId) -> Result<Vec<TourismObject>, StoreError>;

    /// Look up a single tourism object.
    async fn object(&self, id: ObjectId) -> Result<TourismObject, StoreError>;

    /// Calculation history of an area, newest first.
    async fn calculations(&self, area: AreaId) -> Result<Vec<CalculationRecord>, StoreError>;
}

/// Receives computed results for storage.
#[allow(async_fn_in_trait)]
pub trait ResultSink {
    /// Exclusive write access to one area's results.
    ///
    /// Held for a whole calculation run so that the per-object fields and
    /// the area total of two runs never interleave.
    async fn lock_area(&self, area: AreaId) -> OwnedMutexGuard<()>;

    /// Store the four computed fields on an object.
    async fn save_object_result(
        &self,
        id: ObjectId,
        result: &CapacityResult,
    ) -> Result<(), StoreError>;

    /// Store the area total together with the method that produced it.
    async fn save_area_total(
        &self,
        id: AreaId,
        total: f64,
        method: &str,
        calculated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Open a new calculation record in the `Processing` state.
    async fn begin_calculation(
        &self,
        area: AreaId,
        period: CalculationPeriod,
        started_at: DateTime<Utc>,
    ) -> Result<CalculationRecord, StoreError>;

    /// Replace a previously opened calculation record.
    async fn finish_calculation(&self, record: &CalculationRecord) -> Result<(), StoreError>;
}
