//! Model schemas and the model registry.
//!
//! Schemas describe the shape of the models factories build: their columns
//! and `belongs_to` associations. The in-memory store consults the registry
//! before saving, and the instantiation engine uses `belongs_to`
//! declarations to assign foreign keys when associations resolve.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Column value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
	/// Text column.
	Text,
	/// Integer column.
	Integer,
	/// Floating-point column.
	Float,
	/// Boolean column.
	Boolean,
	/// Arbitrary JSON column.
	Json,
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
	/// Column name.
	pub name: String,
	/// Column value type.
	pub column_type: ColumnType,
}

/// A `belongs_to` association declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BelongsTo {
	/// Association name (e.g. "user").
	pub association: String,
	/// Target model identifier (e.g. "User").
	pub model: String,
	/// Foreign-key column on the owning model (e.g. "user_id").
	pub foreign_key: String,
}

/// Schema for one model.
///
/// # Example
///
/// ```
/// use grappelli::model::{ColumnType, ModelSchema};
///
/// let schema = ModelSchema::new("DocPost")
///     .column("title", ColumnType::Text)
///     .column("user_id", ColumnType::Integer)
///     .belongs_to("user");
/// assert_eq!(schema.belongs_to_for("user").unwrap().foreign_key, "user_id");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
	/// Model identifier.
	pub name: String,
	/// Declared columns, in declaration order.
	pub columns: Vec<Column>,
	/// Declared `belongs_to` associations.
	pub belongs_to: Vec<BelongsTo>,
}

impl ModelSchema {
	/// Creates a schema with no columns.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			columns: Vec::new(),
			belongs_to: Vec::new(),
		}
	}

	/// Declares a column.
	pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
		self.columns.push(Column {
			name: name.into(),
			column_type,
		});
		self
	}

	/// Declares a `belongs_to` association.
	///
	/// The target model defaults to the camelized association name and the
	/// foreign key to `<association>_id`.
	pub fn belongs_to(self, association: impl Into<String>) -> Self {
		let association = association.into();
		let model = camelize(&association);
		self.belongs_to_model(association, model)
	}

	/// Declares a `belongs_to` association with an explicit target model.
	pub fn belongs_to_model(
		mut self,
		association: impl Into<String>,
		model: impl Into<String>,
	) -> Self {
		let association = association.into();
		let foreign_key = format!("{association}_id");
		self.belongs_to.push(BelongsTo {
			association,
			model: model.into(),
			foreign_key,
		});
		self
	}

	/// Returns the `belongs_to` declaration for an association name.
	pub fn belongs_to_for(&self, association: &str) -> Option<&BelongsTo> {
		self.belongs_to
			.iter()
			.find(|declared| declared.association == association)
	}

	/// Returns true if the schema declares the named column.
	pub fn has_column(&self, name: &str) -> bool {
		self.columns.iter().any(|column| column.name == name)
	}
}

/// Converts a snake_case name to a model identifier.
///
/// "user" becomes "User", "admin_user" becomes "AdminUser".
pub(crate) fn camelize(name: &str) -> String {
	name.split('_')
		.filter(|part| !part.is_empty())
		.map(|part| {
			let mut chars = part.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect()
}

/// Global model registry.
static MODEL_REGISTRY: Lazy<RwLock<HashMap<String, Arc<ModelSchema>>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a model schema.
///
/// Registering the same model name again replaces the previous schema,
/// matching the redefine-per-scenario flow of test setup code.
pub fn register_model(schema: ModelSchema) {
	tracing::debug!(model = %schema.name, "registered model schema");
	MODEL_REGISTRY
		.write()
		.insert(schema.name.clone(), Arc::new(schema));
}

/// Gets a schema by model identifier.
pub fn get_model(name: &str) -> Option<Arc<ModelSchema>> {
	MODEL_REGISTRY.read().get(name).cloned()
}

/// Checks if a schema is registered for the model identifier.
pub fn has_model(name: &str) -> bool {
	MODEL_REGISTRY.read().contains_key(name)
}

/// Returns all registered model identifiers.
pub fn model_names() -> Vec<String> {
	MODEL_REGISTRY.read().keys().cloned().collect()
}

/// Clears all registered schemas.
///
/// This is primarily useful for testing.
pub fn clear_models() {
	MODEL_REGISTRY.write().clear();
}

/// Model registry handle for scoped operations.
#[derive(Debug, Default)]
pub struct ModelRegistry;

impl ModelRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Registers a model schema.
	pub fn register(&self, schema: ModelSchema) {
		register_model(schema);
	}

	/// Gets a schema by model identifier.
	pub fn get(&self, name: &str) -> Option<Arc<ModelSchema>> {
		get_model(name)
	}

	/// Checks if a schema is registered.
	pub fn has(&self, name: &str) -> bool {
		has_model(name)
	}

	/// Returns all registered model identifiers.
	pub fn names(&self) -> Vec<String> {
		model_names()
	}

	/// Returns the number of registered schemas.
	pub fn len(&self) -> usize {
		MODEL_REGISTRY.read().len()
	}

	/// Returns true if no schemas are registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Clears all schemas (primarily for testing).
	pub fn clear(&self) {
		clear_models();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_schema_builder() {
		let schema = ModelSchema::new("schema.Article")
			.column("title", ColumnType::Text)
			.column("views", ColumnType::Integer);

		assert_eq!(schema.columns.len(), 2);
		assert!(schema.has_column("title"));
		assert!(!schema.has_column("body"));
	}

	#[rstest]
	fn test_belongs_to_defaults() {
		let schema = ModelSchema::new("schema.Comment").belongs_to("author");

		let declared = schema.belongs_to_for("author").unwrap();
		assert_eq!(declared.model, "Author");
		assert_eq!(declared.foreign_key, "author_id");
		assert!(schema.belongs_to_for("editor").is_none());
	}

	#[rstest]
	fn test_belongs_to_explicit_model() {
		let schema = ModelSchema::new("schema.Post").belongs_to_model("author", "schema.User");

		let declared = schema.belongs_to_for("author").unwrap();
		assert_eq!(declared.model, "schema.User");
		assert_eq!(declared.foreign_key, "author_id");
	}

	#[rstest]
	#[case("user", "User")]
	#[case("admin_user", "AdminUser")]
	#[case("post", "Post")]
	fn test_camelize(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(camelize(input), expected);
	}

	#[rstest]
	fn test_register_and_get_model() {
		register_model(ModelSchema::new("registry.Widget").column("size", ColumnType::Integer));

		assert!(has_model("registry.Widget"));
		assert!(!has_model("registry.Gadget"));

		let schema = get_model("registry.Widget").unwrap();
		assert!(schema.has_column("size"));
	}

	#[rstest]
	fn test_register_replaces_schema() {
		register_model(ModelSchema::new("registry.Replaced").column("a", ColumnType::Text));
		register_model(ModelSchema::new("registry.Replaced").column("b", ColumnType::Text));

		let schema = get_model("registry.Replaced").unwrap();
		assert!(schema.has_column("b"));
		assert!(!schema.has_column("a"));
	}

	#[rstest]
	fn test_registry_handle() {
		let registry = ModelRegistry::new();
		registry.register(ModelSchema::new("registry.Handle"));

		assert!(registry.has("registry.Handle"));
		assert!(registry.names().contains(&"registry.Handle".to_string()));
		assert!(registry.get("registry.Handle").is_some());
	}
}
