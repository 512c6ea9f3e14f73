use std::{error, fmt};

use schemars::{
    gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject, StringValidation},
    JsonSchema,
};
use serde::{Deserialize, Serialize};

pub const PINCODE_LENGTH: usize = 6;

/// An Indian postal code: exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pincode(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PincodeError {
    WrongLength(usize),
    NotNumeric,
}

impl error::Error for PincodeError {}

impl fmt::Display for PincodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pincode must be a {}-digit number.", PINCODE_LENGTH)
    }
}

impl Pincode {
    pub fn parse<S: Into<String>>(value: S) -> Result<Self, PincodeError> {
        let value = value.into();
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(PincodeError::NotNumeric);
        }
        if value.len() != PINCODE_LENGTH {
            return Err(PincodeError::WrongLength(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Pincode {
    type Error = PincodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Pincode> for String {
    fn from(value: Pincode) -> Self {
        value.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl JsonSchema for Pincode {
    fn schema_name() -> String {
        "Pincode".to_owned()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            string: Some(Box::new(StringValidation {
                max_length: Some(PINCODE_LENGTH as u32),
                min_length: Some(PINCODE_LENGTH as u32),
                pattern: Some("^[0-9]{6}$".to_owned()),
            })),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_six_ascii_digits() {
        let pincode = Pincode::parse("411014").unwrap();
        assert_eq!(pincode.as_str(), "411014");
        assert_eq!(Pincode::parse("000001").unwrap().to_string(), "000001");
    }

    #[test]
    fn rejects_wrong_length() {
        for (value, length) in [("12345", 5), ("1234567", 7), ("", 0)] {
            assert_eq!(
                Pincode::parse(value),
                Err(PincodeError::WrongLength(length))
            );
        }
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert_eq!(Pincode::parse("41101a"), Err(PincodeError::NotNumeric));
        assert_eq!(Pincode::parse("-41101"), Err(PincodeError::NotNumeric));
        // Devanagari digits are numeric but not ASCII.
        assert_eq!(Pincode::parse("४११०१४"), Err(PincodeError::NotNumeric));
    }

    #[test]
    fn deserialization_validates() {
        let pincode: Pincode = serde_json::from_str("\"560001\"").unwrap();
        assert_eq!(pincode.as_str(), "560001");
        assert!(serde_json::from_str::<Pincode>("\"5600\"").is_err());
    }
}
