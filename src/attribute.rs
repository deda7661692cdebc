//! Attribute
//!
//! Typed feature values held by an [`crate::instance::Instance`].
use crate::constants::{CONTINUOUS_TOKEN, DISCRETE_TOKEN};
use crate::errors::DecisionTreeError;
use crate::utils::{fmt_float, items_to_strings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single feature value, either categorical or numeric.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub enum Attribute {
    Discrete(String),
    Continuous(f64),
}

impl Attribute {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Attribute::Discrete(_) => AttributeType::Discrete,
            Attribute::Continuous(_) => AttributeType::Continuous,
        }
    }

    pub fn as_discrete(&self) -> Option<&str> {
        match self {
            Attribute::Discrete(v) => Some(v),
            Attribute::Continuous(_) => None,
        }
    }

    pub fn as_continuous(&self) -> Option<f64> {
        match self {
            Attribute::Continuous(v) => Some(*v),
            Attribute::Discrete(_) => None,
        }
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Discrete(value.to_string())
    }
}

impl From<String> for Attribute {
    fn from(value: String) -> Self {
        Attribute::Discrete(value)
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Attribute::Continuous(value)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Attribute::Discrete(v) => write!(f, "{}", v),
            Attribute::Continuous(v) => write!(f, "{}", fmt_float(*v)),
        }
    }
}

/// Kind of an attribute, as declared in the header of an instance file.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Discrete,
    Continuous,
}

impl AttributeType {
    /// Parse a raw value into an attribute of this type.
    pub fn parse_value(&self, raw: &str) -> Result<Attribute, DecisionTreeError> {
        match self {
            AttributeType::Discrete => Ok(Attribute::Discrete(raw.to_string())),
            AttributeType::Continuous => raw.trim().parse::<f64>().map(Attribute::Continuous).map_err(|_| {
                DecisionTreeError::ParseString(
                    raw.to_string(),
                    "continuous attribute".to_string(),
                    "a floating point number".to_string(),
                )
            }),
        }
    }
}

impl FromStr for AttributeType {
    type Err = DecisionTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            DISCRETE_TOKEN => Ok(AttributeType::Discrete),
            CONTINUOUS_TOKEN => Ok(AttributeType::Continuous),
            _ => Err(DecisionTreeError::ParseString(
                s.to_string(),
                "AttributeType".to_string(),
                items_to_strings(vec![DISCRETE_TOKEN, CONTINUOUS_TOKEN]),
            )),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeType::Discrete => write!(f, "{}", DISCRETE_TOKEN),
            AttributeType::Continuous => write!(f, "{}", CONTINUOUS_TOKEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_from_str() {
        assert_eq!(AttributeType::from_str("DISCRETE").unwrap(), AttributeType::Discrete);
        assert_eq!(AttributeType::from_str("CONTINUOUS").unwrap(), AttributeType::Continuous);
        assert!(AttributeType::from_str("ORDINAL").is_err());
    }

    #[test]
    fn test_parse_value() {
        let v = AttributeType::Continuous.parse_value("3.25").unwrap();
        assert_eq!(v.as_continuous(), Some(3.25));
        let v = AttributeType::Discrete.parse_value("sunny").unwrap();
        assert_eq!(v.as_discrete(), Some("sunny"));
        assert!(AttributeType::Continuous.parse_value("sunny").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Attribute::from("rainy").to_string(), "rainy");
        assert_eq!(Attribute::from(70.0).to_string(), "70.0");
        assert_eq!(Attribute::from(70.0).attribute_type(), AttributeType::Continuous);
    }
}
