//! Records produced by factory instantiation.
//!
//! A [`Record`] is a transient, schemaless model instance: a model
//! identifier, an optional primary key, field values as JSON data, and the
//! records resolved for its associations. Records live for the duration of
//! a test scenario and are discarded with it.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// A model instance constructed by a factory.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
	model: String,
	factory: String,
	pk: Option<Value>,
	fields: Map<String, Value>,
	associations: HashMap<String, Record>,
	persisted: bool,
}

impl Record {
	/// Creates an empty, unpersisted record.
	///
	/// # Arguments
	///
	/// * `model` - Model identifier the record belongs to
	/// * `factory` - Name of the factory that produced it
	pub fn new(model: impl Into<String>, factory: impl Into<String>) -> Self {
		Self {
			model: model.into(),
			factory: factory.into(),
			pk: None,
			fields: Map::new(),
			associations: HashMap::new(),
			persisted: false,
		}
	}

	/// Returns the model identifier.
	pub fn model(&self) -> &str {
		&self.model
	}

	/// Returns the name of the factory that produced this record.
	pub fn factory(&self) -> &str {
		&self.factory
	}

	/// Returns the primary key, if one has been assigned.
	pub fn pk(&self) -> Option<&Value> {
		self.pk.as_ref()
	}

	/// Assigns the primary key.
	pub fn set_pk(&mut self, pk: Value) {
		self.pk = Some(pk);
	}

	/// Returns a field value.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Sets a field value.
	pub fn set(&mut self, name: impl Into<String>, value: Value) {
		self.fields.insert(name.into(), value);
	}

	/// Returns all field values.
	pub fn fields(&self) -> &Map<String, Value> {
		&self.fields
	}

	/// Returns true until the record has been persisted.
	///
	/// This is the "new record" predicate: it reflects only what the
	/// persistence path (default save or a custom `to_create` hook)
	/// actually did.
	pub fn is_new_record(&self) -> bool {
		!self.persisted
	}

	/// Marks the record as persisted.
	pub fn mark_persisted(&mut self) {
		self.persisted = true;
	}

	/// Returns the record resolved for the named association.
	pub fn association(&self, name: &str) -> Option<&Record> {
		self.associations.get(name)
	}

	/// Attaches a resolved association record.
	pub fn set_association(&mut self, name: impl Into<String>, record: Record) {
		self.associations.insert(name.into(), record);
	}

	/// Returns all resolved associations.
	pub fn associations(&self) -> &HashMap<String, Record> {
		&self.associations
	}
}
