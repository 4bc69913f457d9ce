//! Factory definitions and the definition builder.
//!
//! A definition is a named template: an ordered set of attribute recipes,
//! an optional parent factory whose attributes are inherited unless
//! overridden, an optional model identifier, and an optional `to_create`
//! hook replacing the default persistence path.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::attribute::{Attribute, AttributeList};
use crate::error::FactoryResult;
use crate::faker::FakerType;
use crate::record::Record;

/// Custom creation hook, invoked instead of the default save path.
pub type CreateHook = Arc<dyn Fn(&mut Record) -> FactoryResult<()> + Send + Sync>;

/// A named factory template.
#[derive(Clone)]
pub struct FactoryDefinition {
	name: String,
	parent: Option<String>,
	model: Option<String>,
	attributes: AttributeList,
	to_create: Option<CreateHook>,
}

impl FactoryDefinition {
	/// Starts building a definition with the given factory name.
	///
	/// # Example
	///
	/// ```
	/// use grappelli::FactoryDefinition;
	///
	/// let definition = FactoryDefinition::builder("doc_user")
	///     .attribute("name", "Stephane")
	///     .build();
	/// assert_eq!(definition.name(), "doc_user");
	/// ```
	pub fn builder(name: impl Into<String>) -> FactoryBuilder {
		FactoryBuilder {
			definition: Self {
				name: name.into(),
				parent: None,
				model: None,
				attributes: AttributeList::new(),
				to_create: None,
			},
		}
	}

	/// Returns the factory name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the parent factory name, if declared.
	pub fn parent(&self) -> Option<&str> {
		self.parent.as_deref()
	}

	/// Returns the explicit model identifier, if declared.
	pub fn model(&self) -> Option<&str> {
		self.model.as_deref()
	}

	/// Returns the attribute list.
	pub fn attributes(&self) -> &AttributeList {
		&self.attributes
	}

	pub(crate) fn attributes_mut(&mut self) -> &mut AttributeList {
		&mut self.attributes
	}

	/// Returns the custom creation hook, if declared.
	pub fn to_create(&self) -> Option<&CreateHook> {
		self.to_create.as_ref()
	}

	pub(crate) fn set_to_create(&mut self, hook: CreateHook) {
		self.to_create = Some(hook);
	}
}

impl fmt::Debug for FactoryDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryDefinition")
			.field("name", &self.name)
			.field("parent", &self.parent)
			.field("model", &self.model)
			.field("attributes", &self.attributes)
			.field("to_create", &self.to_create.as_ref().map(|_| ".."))
			.finish()
	}
}

/// Fluent builder for [`FactoryDefinition`].
pub struct FactoryBuilder {
	definition: FactoryDefinition,
}

impl FactoryBuilder {
	/// Sets the model identifier the factory builds.
	///
	/// When absent, the model is inherited from the parent chain, falling
	/// back to the camelized root factory name.
	pub fn model(mut self, model: impl Into<String>) -> Self {
		self.definition.model = Some(model.into());
		self
	}

	/// Declares the parent factory whose attributes are inherited.
	pub fn parent(mut self, parent: impl Into<String>) -> Self {
		self.definition.parent = Some(parent.into());
		self
	}

	/// Declares a static attribute value.
	pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.definition
			.attributes
			.set(name, Attribute::Value(value.into()));
		self
	}

	/// Declares a generated attribute, evaluated per instantiation.
	pub fn generated<F>(mut self, name: impl Into<String>, generator: F) -> Self
	where
		F: Fn() -> Value + Send + Sync + 'static,
	{
		self.definition
			.attributes
			.set(name, Attribute::Generated(Arc::new(generator)));
		self
	}

	/// Declares a sequence attribute.
	///
	/// The sequence counter is global and keyed by `<factory>.<attribute>`;
	/// every `{n}` in `format` is replaced with the counter value.
	pub fn sequence(mut self, name: impl Into<String>, format: impl Into<String>) -> Self {
		let name = name.into();
		let sequence = format!("{}.{}", self.definition.name, name);
		self.definition.attributes.set(
			name,
			Attribute::Sequence {
				sequence,
				format: format.into(),
			},
		);
		self
	}

	/// Declares a fake-data attribute.
	pub fn fake(mut self, name: impl Into<String>, faker: FakerType) -> Self {
		self.definition.attributes.set(name, Attribute::Fake(faker));
		self
	}

	/// Declares an association resolved by instantiating the named factory.
	///
	/// The attribute is named after the factory, matching the common case
	/// where a `post` factory declares a `user` association.
	pub fn association(self, factory: impl Into<String>) -> Self {
		let factory = factory.into();
		let name = factory.clone();
		self.association_to(name, factory)
	}

	/// Declares an association under an explicit attribute name.
	pub fn association_to(
		mut self,
		name: impl Into<String>,
		factory: impl Into<String>,
	) -> Self {
		self.definition.attributes.set(
			name,
			Attribute::Association {
				factory: factory.into(),
			},
		);
		self
	}

	/// Declares a custom creation hook replacing the default save path.
	pub fn to_create<F>(mut self, hook: F) -> Self
	where
		F: Fn(&mut Record) -> FactoryResult<()> + Send + Sync + 'static,
	{
		self.definition.to_create = Some(Arc::new(hook));
		self
	}

	/// Finishes the definition.
	pub fn build(self) -> FactoryDefinition {
		self.definition
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_builder_collects_metadata() {
		let definition = FactoryDefinition::builder("admin")
			.parent("user")
			.model("User")
			.attribute("is_admin", true)
			.build();

		assert_eq!(definition.name(), "admin");
		assert_eq!(definition.parent(), Some("user"));
		assert_eq!(definition.model(), Some("User"));
		assert!(definition.attributes().contains("is_admin"));
		assert!(definition.to_create().is_none());
	}

	#[rstest]
	fn test_attributes_keep_declaration_order() {
		let definition = FactoryDefinition::builder("user")
			.attribute("name", "Stephane")
			.fake("email", FakerType::Email)
			.sequence("code", "user_{n}")
			.build();

		let names: Vec<&str> = definition
			.attributes()
			.iter()
			.map(|(name, _)| name.as_str())
			.collect();
		assert_eq!(names, vec!["name", "email", "code"]);
	}

	#[rstest]
	fn test_redeclared_attribute_replaces() {
		let definition = FactoryDefinition::builder("user")
			.attribute("name", "first")
			.attribute("name", "second")
			.build();

		assert_eq!(definition.attributes().len(), 1);
		assert!(matches!(
			definition.attributes().get("name"),
			Some(Attribute::Value(value)) if value == &json!("second")
		));
	}

	#[rstest]
	fn test_sequence_is_scoped_to_factory() {
		let definition = FactoryDefinition::builder("user")
			.sequence("code", "user_{n}")
			.build();

		assert!(matches!(
			definition.attributes().get("code"),
			Some(Attribute::Sequence { sequence, .. }) if sequence == "user.code"
		));
	}

	#[rstest]
	fn test_association_shorthand() {
		let definition = FactoryDefinition::builder("post").association("user").build();

		assert!(matches!(
			definition.attributes().get("user"),
			Some(Attribute::Association { factory }) if factory == "user"
		));
	}

	#[rstest]
	fn test_association_with_explicit_name() {
		let definition = FactoryDefinition::builder("post")
			.association_to("author", "user")
			.build();

		assert!(matches!(
			definition.attributes().get("author"),
			Some(Attribute::Association { factory }) if factory == "user"
		));
	}

	#[rstest]
	fn test_to_create_hook_is_stored() {
		let definition = FactoryDefinition::builder("user")
			.to_create(|record| {
				record.mark_persisted();
				Ok(())
			})
			.build();

		assert!(definition.to_create().is_some());
		let rendered = format!("{definition:?}");
		assert!(rendered.contains("to_create"));
	}
}
