//! Factory registry: definition storage, lookup, and amendment.
//!
//! Definitions live in a global registry, written during test setup and
//! read at instantiation time. [`modify_factory`] implements the
//! redefinition merge: amended attributes replace the target factory's own
//! recipe for that name (in place, keeping declaration position) or are
//! appended, while descendants keep winning with their own attributes
//! because inheritance is resolved at instantiation time.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::definition::FactoryDefinition;
use crate::error::{FactoryError, FactoryResult};
use crate::record::Record;
use crate::store::Store;
use crate::strategy;

/// Global factory registry.
static FACTORY_REGISTRY: Lazy<RwLock<HashMap<String, Arc<FactoryDefinition>>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a factory definition.
///
/// # Errors
///
/// Returns [`FactoryError::DuplicateFactory`] if the name is already taken.
///
/// # Example
///
/// ```
/// use grappelli::{FactoryDefinition, define_factory};
///
/// define_factory(
///     FactoryDefinition::builder("doc_registry_user")
///         .attribute("name", "Stephane")
///         .build(),
/// )
/// .unwrap();
/// ```
pub fn define_factory(definition: FactoryDefinition) -> FactoryResult<()> {
	let mut registry = FACTORY_REGISTRY.write();
	let name = definition.name().to_string();
	if registry.contains_key(&name) {
		return Err(FactoryError::DuplicateFactory(name));
	}
	tracing::debug!(factory = %name, attributes = definition.attributes().len(), "defined factory");
	registry.insert(name, Arc::new(definition));
	Ok(())
}

/// Amends an already-defined factory.
///
/// Each attribute in the patch replaces the target's own attribute of the
/// same name (keeping its declaration position) or is appended. A patch
/// `to_create` hook replaces the target's hook. The patch's parent and
/// model declarations are ignored: amendment never rewires the chain.
///
/// # Errors
///
/// Returns [`FactoryError::UnknownFactory`] if the factory was never
/// defined.
pub fn modify_factory(patch: FactoryDefinition) -> FactoryResult<()> {
	let mut registry = FACTORY_REGISTRY.write();
	let name = patch.name().to_string();
	let Some(existing) = registry.get(&name) else {
		return Err(FactoryError::UnknownFactory(name));
	};

	let mut updated = (**existing).clone();
	for (attr_name, attribute) in patch.attributes().iter() {
		updated.attributes_mut().set(attr_name.clone(), attribute.clone());
	}
	if let Some(hook) = patch.to_create() {
		updated.set_to_create(hook.clone());
	}
	tracing::debug!(factory = %name, "modified factory");
	registry.insert(name, Arc::new(updated));
	Ok(())
}

/// Gets a factory definition by name.
pub fn get_factory(name: &str) -> Option<Arc<FactoryDefinition>> {
	FACTORY_REGISTRY.read().get(name).cloned()
}

/// Checks if a factory is defined.
pub fn has_factory(name: &str) -> bool {
	FACTORY_REGISTRY.read().contains_key(name)
}

/// Returns all defined factory names.
pub fn factory_names() -> Vec<String> {
	FACTORY_REGISTRY.read().keys().cloned().collect()
}

/// Returns the number of defined factories.
pub fn factory_count() -> usize {
	FACTORY_REGISTRY.read().len()
}

/// Clears all factory definitions.
///
/// This is primarily useful for testing.
pub fn clear_factories() {
	FACTORY_REGISTRY.write().clear();
}

/// Factory registry handle for scoped operations.
#[derive(Debug, Default)]
pub struct FactoryRegistry;

impl FactoryRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Registers a factory definition.
	pub fn define(&self, definition: FactoryDefinition) -> FactoryResult<()> {
		define_factory(definition)
	}

	/// Amends an already-defined factory.
	pub fn modify(&self, patch: FactoryDefinition) -> FactoryResult<()> {
		modify_factory(patch)
	}

	/// Gets a factory definition by name.
	pub fn get(&self, name: &str) -> Option<Arc<FactoryDefinition>> {
		get_factory(name)
	}

	/// Checks if a factory is defined.
	pub fn has(&self, name: &str) -> bool {
		has_factory(name)
	}

	/// Returns all defined factory names.
	pub fn names(&self) -> Vec<String> {
		factory_names()
	}

	/// Returns the number of defined factories.
	pub fn len(&self) -> usize {
		factory_count()
	}

	/// Returns true if no factories are defined.
	pub fn is_empty(&self) -> bool {
		factory_count() == 0
	}

	/// Clears all definitions (primarily for testing).
	pub fn clear(&self) {
		clear_factories();
	}

	/// Builds a record without persisting it.
	pub fn build(&self, name: &str) -> FactoryResult<Record> {
		strategy::build(name)
	}

	/// Builds a record with caller overrides, without persisting it.
	pub fn build_with(&self, name: &str, overrides: Value) -> FactoryResult<Record> {
		strategy::build_with(name, overrides)
	}

	/// Creates a persisted record through the default store.
	pub fn create(&self, name: &str) -> FactoryResult<Record> {
		strategy::create(name)
	}

	/// Creates a persisted record with caller overrides.
	pub fn create_with(&self, name: &str, overrides: Value) -> FactoryResult<Record> {
		strategy::create_with(name, overrides)
	}

	/// Creates a persisted record through an explicit store.
	pub fn create_in(&self, name: &str, store: &dyn Store) -> FactoryResult<Record> {
		strategy::create_in(name, store)
	}

	/// Evaluates a factory's attributes without building a record.
	pub fn attributes_for(&self, name: &str) -> FactoryResult<Map<String, Value>> {
		strategy::attributes_for(name)
	}
}
