//! Persistence collaborator for created records.
//!
//! Factories do not persist anything themselves. The default `create` path
//! hands the constructed record to a [`Store`], and a factory's `to_create`
//! hook replaces that hand-off entirely. [`MemoryStore`] is the reference
//! implementation used by tests; applications plug in their own store via
//! [`set_default_store`] or the `*_in` instantiation entry points.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::{FactoryError, FactoryResult};
use crate::model;
use crate::record::Record;

/// Persistence seam for created records.
pub trait Store: Send + Sync {
	/// Saves a record, assigning its primary key and marking it persisted.
	///
	/// # Returns
	///
	/// Returns the assigned primary key.
	fn save(&self, record: &mut Record) -> FactoryResult<Value>;
}

/// In-memory store backed by per-model tables.
///
/// Rows are retained so tests can inspect what was saved. Primary keys are
/// monotonically increasing integers, assigned per model.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
	next_pk: RwLock<HashMap<String, u64>>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of saved rows for a model.
	pub fn count(&self, model: &str) -> usize {
		self.tables.read().get(model).map_or(0, Vec::len)
	}

	/// Returns a copy of the saved rows for a model.
	pub fn rows(&self, model: &str) -> Vec<Map<String, Value>> {
		self.tables.read().get(model).cloned().unwrap_or_default()
	}

	/// Removes all saved rows and resets primary key counters.
	pub fn clear(&self) {
		self.tables.write().clear();
		self.next_pk.write().clear();
	}
}

impl Store for MemoryStore {
	fn save(&self, record: &mut Record) -> FactoryResult<Value> {
		let model = record.model().to_string();
		if !model::has_model(&model) {
			return Err(FactoryError::ModelNotFound(model));
		}

		let pk = {
			let mut counters = self.next_pk.write();
			let counter = counters.entry(model.clone()).or_insert(0);
			*counter += 1;
			Value::from(*counter)
		};

		let mut row = record.fields().clone();
		row.insert("id".to_string(), pk.clone());
		self.tables.write().entry(model.clone()).or_default().push(row);

		record.set_pk(pk.clone());
		record.mark_persisted();
		tracing::debug!(model = %model, pk = %pk, "saved record");
		Ok(pk)
	}
}

/// Global default store used by the instantiation entry points.
static DEFAULT_STORE: Lazy<RwLock<Arc<dyn Store>>> =
	Lazy::new(|| RwLock::new(Arc::new(MemoryStore::new())));

/// Returns the current default store.
pub fn default_store() -> Arc<dyn Store> {
	DEFAULT_STORE.read().clone()
}

/// Replaces the default store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use grappelli::store::{MemoryStore, set_default_store};
///
/// set_default_store(Arc::new(MemoryStore::new()));
/// ```
pub fn set_default_store(store: Arc<dyn Store>) {
	*DEFAULT_STORE.write() = store;
}
