//! Fake data generators for factory attributes.
//!
//! Wraps the `fake` crate behind a small enum so factory definitions can
//! declare realistic-looking defaults without touching generator closures.

use std::str::FromStr;

use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;

use crate::error::FactoryError;

/// Supported fake data generators.
///
/// Each variant maps to a generator from the `fake` crate (or the `uuid`
/// crate for [`FakerType::Uuid`]). Values are regenerated on every
/// instantiation, so two records built from the same factory never share
/// faked data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakerType {
	/// Internet username, e.g. "silver_fox".
	Username,
	/// Safe (non-routable) email address.
	Email,
	/// Full person name.
	Name,
	/// Given name.
	FirstName,
	/// Family name.
	LastName,
	/// Single lorem word.
	Word,
	/// Lorem sentence of 3 to 8 words.
	Sentence,
	/// Lorem paragraph of 1 to 3 sentences.
	Paragraph,
	/// Phone number.
	PhoneNumber,
	/// City name.
	City,
	/// Company name.
	Company,
	/// Random v4 UUID.
	Uuid,
}

impl FakerType {
	/// Generates a fresh fake value.
	pub fn generate(&self) -> String {
		match self {
			Self::Username => Username().fake(),
			Self::Email => SafeEmail().fake(),
			Self::Name => Name().fake(),
			Self::FirstName => FirstName().fake(),
			Self::LastName => LastName().fake(),
			Self::Word => Word().fake(),
			Self::Sentence => Sentence(3..8).fake(),
			Self::Paragraph => Paragraph(1..3).fake(),
			Self::PhoneNumber => PhoneNumber().fake(),
			Self::City => CityName().fake(),
			Self::Company => CompanyName().fake(),
			Self::Uuid => uuid::Uuid::new_v4().to_string(),
		}
	}
}

impl FromStr for FakerType {
	type Err = FactoryError;

	/// Parses the snake_case generator names used in factory declarations.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"username" => Ok(Self::Username),
			"email" => Ok(Self::Email),
			"name" => Ok(Self::Name),
			"first_name" => Ok(Self::FirstName),
			"last_name" => Ok(Self::LastName),
			"word" => Ok(Self::Word),
			"sentence" => Ok(Self::Sentence),
			"paragraph" => Ok(Self::Paragraph),
			"phone_number" => Ok(Self::PhoneNumber),
			"city" => Ok(Self::City),
			"company" => Ok(Self::Company),
			"uuid" => Ok(Self::Uuid),
			other => Err(FactoryError::UnknownFaker(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_email_looks_like_email() {
		let value = FakerType::Email.generate();
		assert!(value.contains('@'), "not an email: {value}");
	}

	#[rstest]
	#[case(FakerType::Username)]
	#[case(FakerType::Name)]
	#[case(FakerType::Word)]
	#[case(FakerType::Sentence)]
	#[case(FakerType::City)]
	#[case(FakerType::Company)]
	fn test_generators_produce_values(#[case] faker: FakerType) {
		assert!(!faker.generate().is_empty());
	}

	#[rstest]
	fn test_uuid_is_unique() {
		assert_ne!(FakerType::Uuid.generate(), FakerType::Uuid.generate());
	}

	#[rstest]
	fn test_from_str_known_names() {
		assert_eq!("email".parse::<FakerType>().unwrap(), FakerType::Email);
		assert_eq!(
			"first_name".parse::<FakerType>().unwrap(),
			FakerType::FirstName
		);
	}

	#[rstest]
	fn test_from_str_unknown_name() {
		let result = "telegram".parse::<FakerType>();
		assert!(matches!(result, Err(FactoryError::UnknownFaker(_))));
	}
}
