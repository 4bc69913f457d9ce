//! Attribute kinds and ordered attribute lists.
//!
//! A factory definition is, at its core, an ordered mapping of attribute
//! name to a recipe for producing that attribute's value. Order matters:
//! attributes are evaluated in declaration order, and an attribute that
//! overrides an inherited one keeps the position it was first declared at.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::faker::FakerType;

/// Zero-argument value generator, evaluated once per instantiation.
pub type ValueGenerator = Arc<dyn Fn() -> Value + Send + Sync>;

/// A recipe for producing one attribute value.
#[derive(Clone)]
pub enum Attribute {
	/// Static value, cloned into every record.
	Value(Value),

	/// Generator closure invoked per instantiation.
	Generated(ValueGenerator),

	/// Named global sequence formatted through a `{n}` placeholder.
	Sequence {
		/// Sequence counter name.
		sequence: String,
		/// Format string; `{n}` is replaced with the counter value.
		format: String,
	},

	/// Fake data generator.
	Fake(FakerType),

	/// Reference to another factory, resolved by recursive instantiation.
	Association {
		/// Name of the factory to instantiate.
		factory: String,
	},
}

impl fmt::Debug for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Self::Generated(_) => f.write_str("Generated(..)"),
			Self::Sequence { sequence, format } => f
				.debug_struct("Sequence")
				.field("sequence", sequence)
				.field("format", format)
				.finish(),
			Self::Fake(faker) => f.debug_tuple("Fake").field(faker).finish(),
			Self::Association { factory } => {
				f.debug_struct("Association").field("factory", factory).finish()
			}
		}
	}
}

/// Ordered list of named attributes.
///
/// Preserves declaration order. [`AttributeList::set`] is the single merge
/// primitive: it replaces an existing entry in place (keeping its original
/// position) or appends a new one, which is exactly the semantics needed
/// both for child-over-parent inheritance and for factory amendment.
#[derive(Debug, Clone, Default)]
pub struct AttributeList {
	entries: Vec<(String, Attribute)>,
}

impl AttributeList {
	/// Creates an empty attribute list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets an attribute, replacing in place or appending.
	pub fn set(&mut self, name: impl Into<String>, attribute: Attribute) {
		let name = name.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some(entry) => entry.1 = attribute,
			None => self.entries.push((name, attribute)),
		}
	}

	/// Returns the attribute with the given name.
	pub fn get(&self, name: &str) -> Option<&Attribute> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, attribute)| attribute)
	}

	/// Returns true if an attribute with the given name is defined.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|(existing, _)| existing == name)
	}

	/// Iterates entries in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &(String, Attribute)> {
		self.entries.iter()
	}

	/// Returns the number of attributes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no attributes are defined.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn names(list: &AttributeList) -> Vec<&str> {
		list.iter().map(|(name, _)| name.as_str()).collect()
	}

	#[rstest]
	fn test_set_appends_in_order() {
		let mut list = AttributeList::new();
		list.set("name", Attribute::Value(json!("a")));
		list.set("email", Attribute::Value(json!("b")));
		list.set("age", Attribute::Value(json!(30)));

		assert_eq!(names(&list), vec!["name", "email", "age"]);
	}

	#[rstest]
	fn test_set_replaces_in_place() {
		let mut list = AttributeList::new();
		list.set("name", Attribute::Value(json!("a")));
		list.set("email", Attribute::Value(json!("b")));
		list.set("name", Attribute::Value(json!("c")));

		assert_eq!(names(&list), vec!["name", "email"]);
		assert!(matches!(
			list.get("name"),
			Some(Attribute::Value(value)) if value == &json!("c")
		));
	}

	#[rstest]
	fn test_contains_and_len() {
		let mut list = AttributeList::new();
		assert!(list.is_empty());

		list.set("title", Attribute::Fake(crate::faker::FakerType::Sentence));
		assert!(list.contains("title"));
		assert!(!list.contains("body"));
		assert_eq!(list.len(), 1);
	}

	#[rstest]
	fn test_generated_attribute_debug() {
		let attribute = Attribute::Generated(Arc::new(|| json!(1)));
		assert_eq!(format!("{attribute:?}"), "Generated(..)");
	}
}
