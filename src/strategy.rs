//! Instantiation strategies and the evaluation engine.
//!
//! Instantiation resolves the factory's parent chain, folds attribute
//! lists so child definitions override inherited ones in place, then
//! evaluates attributes in declaration order. Associations are resolved by
//! recursively instantiating the referenced factory with the same
//! strategy. `Create` persists the finished record through the factory's
//! `to_create` hook when one is declared, or the store otherwise.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::attribute::{Attribute, AttributeList};
use crate::definition::{CreateHook, FactoryDefinition};
use crate::error::{FactoryError, FactoryResult};
use crate::model;
use crate::record::Record;
use crate::registry;
use crate::sequence;
use crate::store::{self, Store};

/// How a factory instantiation handles persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// Construct in memory, never persist.
	Build,
	/// Construct, then persist.
	Create,
}

/// Maximum depth of association recursion.
const MAX_ASSOCIATION_DEPTH: usize = 8;

/// Builds a record without persisting it.
pub fn build(name: &str) -> FactoryResult<Record> {
	let store = store::default_store();
	run(name, Strategy::Build, Map::new(), store.as_ref(), 0)
}

/// Builds a record with caller overrides, without persisting it.
///
/// `overrides` must be a JSON object (or null); its entries win over every
/// definition attribute, including associations. Entries that match no
/// attribute are set as extra fields.
pub fn build_with(name: &str, overrides: Value) -> FactoryResult<Record> {
	let overrides = overrides_map(overrides)?;
	let store = store::default_store();
	run(name, Strategy::Build, overrides, store.as_ref(), 0)
}

/// Creates a persisted record through the default store.
///
/// # Example
///
/// ```
/// use grappelli::model::{ModelSchema, register_model};
/// use grappelli::{FactoryDefinition, create, define_factory};
///
/// register_model(ModelSchema::new("DocCreateWidget"));
/// define_factory(
///     FactoryDefinition::builder("doc_create_widget")
///         .model("DocCreateWidget")
///         .build(),
/// )
/// .unwrap();
///
/// let widget = create("doc_create_widget").unwrap();
/// assert!(!widget.is_new_record());
/// ```
pub fn create(name: &str) -> FactoryResult<Record> {
	let store = store::default_store();
	run(name, Strategy::Create, Map::new(), store.as_ref(), 0)
}

/// Creates a persisted record with caller overrides.
pub fn create_with(name: &str, overrides: Value) -> FactoryResult<Record> {
	let overrides = overrides_map(overrides)?;
	let store = store::default_store();
	run(name, Strategy::Create, overrides, store.as_ref(), 0)
}

/// Creates a persisted record through an explicit store.
pub fn create_in(name: &str, store: &dyn Store) -> FactoryResult<Record> {
	run(name, Strategy::Create, Map::new(), store, 0)
}

/// Creates a persisted record with caller overrides through an explicit
/// store.
pub fn create_with_in(name: &str, overrides: Value, store: &dyn Store) -> FactoryResult<Record> {
	let overrides = overrides_map(overrides)?;
	run(name, Strategy::Create, overrides, store, 0)
}

/// Evaluates a factory's attributes without building a record.
///
/// Associations are skipped, matching the attributes-only strategy of the
/// factory libraries this crate descends from.
pub fn attributes_for(name: &str) -> FactoryResult<Map<String, Value>> {
	evaluate_fields(name, Map::new())
}

/// Evaluates a factory's attributes with caller overrides.
pub fn attributes_for_with(name: &str, overrides: Value) -> FactoryResult<Map<String, Value>> {
	let overrides = overrides_map(overrides)?;
	evaluate_fields(name, overrides)
}

/// Builds a batch of records without persisting them.
///
/// Each record is evaluated independently: generators, sequences, and
/// fakers produce fresh values per instance.
pub fn build_batch(name: &str, count: usize) -> FactoryResult<Vec<Record>> {
	let store = store::default_store();
	let mut records = Vec::with_capacity(count);
	for _ in 0..count {
		records.push(run(name, Strategy::Build, Map::new(), store.as_ref(), 0)?);
	}
	Ok(records)
}

/// Creates a batch of persisted records through the default store.
pub fn create_batch(name: &str, count: usize) -> FactoryResult<Vec<Record>> {
	let store = store::default_store();
	let mut records = Vec::with_capacity(count);
	for _ in 0..count {
		records.push(run(name, Strategy::Create, Map::new(), store.as_ref(), 0)?);
	}
	Ok(records)
}

/// Validates and unwraps an overrides value.
fn overrides_map(overrides: Value) -> FactoryResult<Map<String, Value>> {
	match overrides {
		Value::Null => Ok(Map::new()),
		Value::Object(map) => Ok(map),
		other => Err(FactoryError::InvalidOverrides(format!(
			"expected a JSON object, got {other}"
		))),
	}
}

/// Resolves the parent chain, leaf first.
fn resolve_chain(name: &str) -> FactoryResult<Vec<Arc<FactoryDefinition>>> {
	let mut chain: Vec<Arc<FactoryDefinition>> = Vec::new();
	let mut seen: Vec<String> = Vec::new();
	let mut current = name.to_string();

	loop {
		if seen.contains(&current) {
			return Err(FactoryError::InheritanceCycle(current));
		}
		let Some(definition) = registry::get_factory(&current) else {
			return Err(match seen.last() {
				Some(child) => FactoryError::UnknownParent {
					factory: child.clone(),
					parent: current,
				},
				None => FactoryError::UnknownFactory(current),
			});
		};
		seen.push(current.clone());
		let parent = definition.parent().map(str::to_string);
		chain.push(definition);
		match parent {
			Some(next) => current = next,
			None => break,
		}
	}
	Ok(chain)
}

/// Returns the model identifier the chain builds.
///
/// The nearest explicit declaration wins; with none, the root factory's
/// camelized name is used, so a child factory builds its parent's model.
fn effective_model(chain: &[Arc<FactoryDefinition>]) -> String {
	chain
		.iter()
		.find_map(|definition| definition.model().map(str::to_string))
		.unwrap_or_else(|| model::camelize(chain[chain.len() - 1].name()))
}

/// Folds the chain's attribute lists, root first.
///
/// A child attribute overriding an inherited one replaces it in place, so
/// resolution order stays the order of first declaration.
fn compile_attributes(chain: &[Arc<FactoryDefinition>]) -> AttributeList {
	let mut compiled = AttributeList::new();
	for definition in chain.iter().rev() {
		for (name, attribute) in definition.attributes().iter() {
			compiled.set(name.clone(), attribute.clone());
		}
	}
	compiled
}

/// Returns the nearest `to_create` hook in the chain, if any.
fn effective_create_hook(chain: &[Arc<FactoryDefinition>]) -> Option<CreateHook> {
	chain
		.iter()
		.find_map(|definition| definition.to_create().cloned())
}

fn run(
	name: &str,
	strategy: Strategy,
	mut overrides: Map<String, Value>,
	store: &dyn Store,
	depth: usize,
) -> FactoryResult<Record> {
	if depth > MAX_ASSOCIATION_DEPTH {
		return Err(FactoryError::AssociationDepth {
			factory: name.to_string(),
			depth,
		});
	}

	let chain = resolve_chain(name)?;
	let model_name = effective_model(&chain);
	let compiled = compile_attributes(&chain);
	tracing::debug!(factory = %name, model = %model_name, strategy = ?strategy, "instantiating");

	let mut record = Record::new(model_name, name);
	for (attr_name, attribute) in compiled.iter() {
		if let Some(value) = overrides.remove(attr_name) {
			record.set(attr_name.as_str(), value);
			continue;
		}
		match attribute {
			Attribute::Value(value) => record.set(attr_name.as_str(), value.clone()),
			Attribute::Generated(generator) => record.set(attr_name.as_str(), generator()),
			Attribute::Sequence {
				sequence: counter,
				format,
			} => record.set(
				attr_name.as_str(),
				Value::String(sequence::sequence(counter, format)),
			),
			Attribute::Fake(faker) => {
				record.set(attr_name.as_str(), Value::String(faker.generate()));
			}
			Attribute::Association { factory } => {
				let associated = run(factory, strategy, Map::new(), store, depth + 1)?;
				attach_association(&mut record, attr_name, associated);
			}
		}
	}
	for (leftover, value) in overrides {
		record.set(leftover, value);
	}

	if strategy == Strategy::Create {
		match effective_create_hook(&chain) {
			Some(hook) => hook(&mut record)?,
			None => {
				store.save(&mut record)?;
			}
		}
	}
	Ok(record)
}

/// Wires a resolved association into the owning record.
///
/// When the owner's schema declares a matching `belongs_to` and the
/// associated record has a primary key, the foreign-key field is assigned.
fn attach_association(record: &mut Record, name: &str, associated: Record) {
	if let Some(schema) = model::get_model(record.model()) {
		if let Some(declared) = schema.belongs_to_for(name) {
			if let Some(pk) = associated.pk() {
				record.set(declared.foreign_key.as_str(), pk.clone());
			}
		}
	}
	record.set_association(name, associated);
}

fn evaluate_fields(
	name: &str,
	mut overrides: Map<String, Value>,
) -> FactoryResult<Map<String, Value>> {
	let chain = resolve_chain(name)?;
	let compiled = compile_attributes(&chain);

	let mut fields = Map::new();
	for (attr_name, attribute) in compiled.iter() {
		if let Some(value) = overrides.remove(attr_name) {
			fields.insert(attr_name.clone(), value);
			continue;
		}
		match attribute {
			Attribute::Value(value) => {
				fields.insert(attr_name.clone(), value.clone());
			}
			Attribute::Generated(generator) => {
				fields.insert(attr_name.clone(), generator());
			}
			Attribute::Sequence {
				sequence: counter,
				format,
			} => {
				fields.insert(
					attr_name.clone(),
					Value::String(sequence::sequence(counter, format)),
				);
			}
			Attribute::Fake(faker) => {
				fields.insert(attr_name.clone(), Value::String(faker.generate()));
			}
			Attribute::Association { .. } => {}
		}
	}
	for (leftover, value) in overrides {
		fields.insert(leftover, value);
	}
	Ok(fields)
}
