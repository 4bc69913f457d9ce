//! Error types for factory operations.
//!
//! This module defines the error types used throughout the grappelli crate.

use thiserror::Error;

/// Errors that can occur during factory definition and instantiation.
#[derive(Debug, Error)]
pub enum FactoryError {
	/// The named factory was never defined.
	#[error("Unknown factory: {0}")]
	UnknownFactory(String),

	/// A factory with this name is already defined.
	#[error("Factory already defined: {0}")]
	DuplicateFactory(String),

	/// A parent chain references a factory that was never defined.
	#[error("Unknown parent factory: {parent} (required by {factory})")]
	UnknownParent {
		/// Factory whose parent chain is broken.
		factory: String,
		/// Parent name that could not be resolved.
		parent: String,
	},

	/// The parent chain of a factory revisits an already-seen factory.
	#[error("Inheritance cycle detected at factory: {0}")]
	InheritanceCycle(String),

	/// Association resolution recursed past the supported depth.
	#[error("Association depth exceeded at factory {factory} (depth {depth})")]
	AssociationDepth {
		/// Factory being instantiated when the cap was hit.
		factory: String,
		/// Depth at which resolution stopped.
		depth: usize,
	},

	/// No model schema is registered for the model identifier.
	#[error("Model not found: {0}")]
	ModelNotFound(String),

	/// Instantiation overrides were not a JSON object.
	#[error("Invalid overrides: {0}")]
	InvalidOverrides(String),

	/// A faker type name did not match any known generator.
	#[error("Unknown faker type: {0}")]
	UnknownFaker(String),

	/// The persistence collaborator failed to save a record.
	#[error("Persistence error: {0}")]
	Persistence(String),
}

/// Result type alias for factory operations.
pub type FactoryResult<T> = Result<T, FactoryError>;
