//! Declarative test data factories for Rust.
//!
//! This crate lets test suites define named factories — templates for
//! constructing model instances with default attributes, single-parent
//! inheritance, and associations — and instantiate them through build or
//! create strategies, with persistence delegated to a pluggable store.
//!
//! # Quick Start
//!
//! Declare the models involved, define factories for them, and create
//! records:
//!
//! ```
//! use grappelli::prelude::*;
//!
//! register_model(ModelSchema::new("LibDocUser"));
//! register_model(
//!     ModelSchema::new("LibDocPost")
//!         .column("lib_doc_user_id", ColumnType::Integer)
//!         .belongs_to_model("lib_doc_user", "LibDocUser"),
//! );
//!
//! define_factory(
//!     FactoryDefinition::builder("lib_doc_user")
//!         .model("LibDocUser")
//!         .fake("email", FakerType::Email)
//!         .sequence("code", "user_{n}")
//!         .build(),
//! )
//! .unwrap();
//!
//! define_factory(
//!     FactoryDefinition::builder("lib_doc_post")
//!         .model("LibDocPost")
//!         .attribute("title", "Hello")
//!         .association("lib_doc_user")
//!         .build(),
//! )
//! .unwrap();
//!
//! let post = create("lib_doc_post").unwrap();
//! assert!(!post.is_new_record());
//!
//! let author = post.association("lib_doc_user").unwrap();
//! assert!(!author.is_new_record());
//! assert_eq!(post.get("lib_doc_user_id"), author.pk());
//! ```
//!
//! # Inheritance and amendment
//!
//! A factory may declare a parent whose attributes it inherits unless it
//! defines its own. Already-defined factories can be amended with
//! [`modify_factory`](registry::modify_factory): amended attributes become
//! visible to the factory and its descendants, except where a descendant
//! defines its own value for that attribute name.
//!
//! ```
//! use grappelli::prelude::*;
//! use serde_json::json;
//!
//! define_factory(FactoryDefinition::builder("lib_doc_member").build()).unwrap();
//! define_factory(
//!     FactoryDefinition::builder("lib_doc_admin")
//!         .parent("lib_doc_member")
//!         .attribute("is_admin", true)
//!         .build(),
//! )
//! .unwrap();
//!
//! modify_factory(
//!     FactoryDefinition::builder("lib_doc_member")
//!         .attribute("name", "New Member")
//!         .build(),
//! )
//! .unwrap();
//!
//! let admin = build("lib_doc_admin").unwrap();
//! assert_eq!(admin.get("name"), Some(&json!("New Member")));
//! assert_eq!(admin.get("is_admin"), Some(&json!(true)));
//! ```
//!
//! # Custom creation
//!
//! A `to_create` hook fully replaces the default save path; the record's
//! "new record" predicate then reflects only what the hook did.
//!
//! # Architecture
//!
//! - [`FactoryDefinition`](definition::FactoryDefinition) - Named template
//!   with ordered attributes, parent link, and creation hook
//! - [`Attribute`](attribute::Attribute) - Static value, generator,
//!   sequence, faker, or association recipe
//! - [`registry`] - Global definition storage with define/modify semantics
//! - [`strategy`] - Build/create instantiation engine
//! - [`Record`](record::Record) - Transient constructed instance
//! - [`Store`](store::Store) - Persistence seam, with
//!   [`MemoryStore`](store::MemoryStore) as the in-memory reference
//! - [`model`] - Model schemas consulted for foreign-key wiring
//! - [`sequence`] / [`faker`] - Unique and fake value generation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod attribute;
pub mod definition;
pub mod error;
pub mod faker;
pub mod model;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod sequence;
pub mod store;
pub mod strategy;

// Re-export commonly used types at crate root
pub use attribute::{Attribute, AttributeList};
pub use definition::{FactoryBuilder, FactoryDefinition};
pub use error::{FactoryError, FactoryResult};
pub use faker::FakerType;
pub use model::{ModelRegistry, ModelSchema};
pub use record::Record;
pub use registry::{FactoryRegistry, define_factory, modify_factory};
pub use store::{MemoryStore, Store};
pub use strategy::{Strategy, attributes_for, build, build_batch, create, create_batch};
