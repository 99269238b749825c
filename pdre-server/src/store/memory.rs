//! In-memory store, optionally seeded from a JSON dataset file.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use super::error::StoreError;
use super::records::{CalculationRecord, ProtectedArea, TourismObject};
use super::{AreaSource, ResultSink};
use crate::domain::{AreaId, CalculationPeriod, CapacityResult, ObjectId};

/// Everything the store holds, in the shape of the dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub areas: Vec<ProtectedArea>,
    #[serde(default)]
    pub objects: Vec<TourismObject>,
    #[serde(default)]
    pub calculations: Vec<CalculationRecord>,
}

/// Store backed by a [`Dataset`] behind a lock.
///
/// Single field updates take the dataset write lock. Whole calculation runs
/// are serialised per area through [`ResultSink::lock_area`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Dataset>,
    area_locks: Mutex<HashMap<AreaId, Arc<Mutex<()>>>>,
}

impl MemoryStore {
    /// Create a store holding `dataset`.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
            area_locks: Mutex::default(),
        }
    }

    /// Load a dataset from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset = serde_json::from_str(&json)?;
        Ok(Self::new(dataset))
    }

    /// Write the current contents to a JSON file.
    ///
    /// The file is written to a temporary file in the same directory and
    /// renamed into place, so readers never see a partial dataset.
    /// Creates parent directories if they don't exist.
    pub async fn save_json_file(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.data.read().await)?;

        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }

    /// A copy of the current contents.
    pub async fn snapshot(&self) -> Dataset {
        self.data.read().await.clone()
    }

    /// All protected areas.
    pub async fn areas(&self) -> Vec<ProtectedArea> {
        self.data.read().await.areas.clone()
    }

    /// Add or replace a protected area.
    pub async fn upsert_area(&self, area: ProtectedArea) {
        let mut data = self.data.write().await;
        match data.areas.iter_mut().find(|a| a.id == area.id) {
            Some(existing) => *existing = area,
            None => data.areas.push(area),
        }
    }

    /// Add or replace a tourism object.
    ///
    /// Fails with [`StoreError::AreaNotFound`] if the object's area does
    /// not exist.
    pub async fn upsert_object(&self, object: TourismObject) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if !data.areas.iter().any(|a| a.id == object.area_id) {
            return Err(StoreError::AreaNotFound(object.area_id));
        }
        match data.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => *existing = object,
            None => data.objects.push(object),
        }
        Ok(())
    }
}

impl AreaSource for MemoryStore {
    async fn area(&self, id: AreaId) -> Result<ProtectedArea, StoreError> {
        let data = self.data.read().await;
        data.areas
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::AreaNotFound(id))
    }

    async fn active_objects(&self, area: AreaId) -> Result<Vec<TourismObject>, StoreError> {
        let data = self.data.read().await;
        if !data.areas.iter().any(|a| a.id == area) {
            return Err(StoreError::AreaNotFound(area));
        }
        Ok(data
            .objects
            .iter()
            .filter(|o| o.area_id == area && o.is_active)
            .cloned()
            .collect())
    }

    async fn object(&self, id: ObjectId) -> Result<TourismObject, StoreError> {
        let data = self.data.read().await;
        data.objects
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StoreError::ObjectNotFound(id))
    }

    async fn calculations(&self, area: AreaId) -> Result<Vec<CalculationRecord>, StoreError> {
        let data = self.data.read().await;
        if !data.areas.iter().any(|a| a.id == area) {
            return Err(StoreError::AreaNotFound(area));
        }
        let mut records: Vec<CalculationRecord> = data
            .calculations
            .iter()
            .filter(|c| c.area_id == area)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}

impl ResultSink for MemoryStore {
    async fn lock_area(&self, area: AreaId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.area_locks.lock().await;
            locks.entry(area).or_default().clone()
        };
        lock.lock_owned().await
    }

    async fn save_object_result(
        &self,
        id: ObjectId,
        result: &CapacityResult,
    ) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let object = data
            .objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::ObjectNotFound(id))?;
        object.capacity = Some(*result);
        Ok(())
    }

    async fn save_area_total(
        &self,
        id: AreaId,
        total: f64,
        method: &str,
        calculated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let area = data
            .areas
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::AreaNotFound(id))?;
        area.pdre_value = Some(total);
        area.calculation_method = Some(method.to_string());
        area.calculated_at = Some(calculated_at);
        Ok(())
    }

    async fn begin_calculation(
        &self,
        area: AreaId,
        period: CalculationPeriod,
        started_at: DateTime<Utc>,
    ) -> Result<CalculationRecord, StoreError> {
        let mut data = self.data.write().await;
        let id = data.calculations.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let record = CalculationRecord::processing(id, area, period, started_at);
        data.calculations.push(record.clone());
        Ok(record)
    }

    async fn finish_calculation(&self, record: &CalculationRecord) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        let existing = data
            .calculations
            .iter_mut()
            .find(|c| c.id == record.id)
            .ok_or(StoreError::CalculationNotFound(record.id))?;
        *existing = record.clone();
        Ok(())
    }
}
