//! Convenience re-exports for common usage.
//!
//! This module provides a single import for the most commonly used items
//! from the grappelli crate.
//!
//! # Example
//!
//! ```
//! use grappelli::prelude::*;
//!
//! define_factory(
//!     FactoryDefinition::builder("prelude_doc_user")
//!         .attribute("name", "Stephane")
//!         .build(),
//! )
//! .unwrap();
//!
//! let user = build("prelude_doc_user").unwrap();
//! assert!(user.is_new_record());
//! ```

// Error types
pub use crate::error::{FactoryError, FactoryResult};

// Definition types
pub use crate::attribute::{Attribute, AttributeList, ValueGenerator};
pub use crate::definition::{CreateHook, FactoryBuilder, FactoryDefinition};

// Registry
pub use crate::registry::{
	FactoryRegistry, clear_factories, define_factory, factory_names, get_factory, has_factory,
	modify_factory,
};

// Records and models
pub use crate::model::{
	BelongsTo, Column, ColumnType, ModelRegistry, ModelSchema, clear_models, get_model, has_model,
	register_model,
};
pub use crate::record::Record;

// Persistence
pub use crate::store::{MemoryStore, Store, default_store, set_default_store};

// Instantiation
pub use crate::strategy::{
	Strategy, attributes_for, attributes_for_with, build, build_batch, build_with, create,
	create_batch, create_in, create_with, create_with_in,
};

// Value generation
pub use crate::faker::FakerType;
pub use crate::sequence::{next_value, reset_sequences, sequence};
