//! Decision Condition
//!
//! The attribute test that routes an instance from a parent node into one of its children.
use crate::attribute::Attribute;
use crate::constants::DISCRETE_WILDCARD;
use crate::errors::DecisionTreeError;
use crate::instance::Instance;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Discrete equality, written `=`.
    Equal,
    /// Continuous `value <= threshold`, written `<`.
    LessOrEqual,
    /// Continuous `value > threshold`, written `>`.
    Greater,
}

impl Comparison {
    pub fn symbol(&self) -> char {
        match self {
            Comparison::Equal => '=',
            Comparison::LessOrEqual => '<',
            Comparison::Greater => '>',
        }
    }
}

impl FromStr for Comparison {
    type Err = DecisionTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Comparison::Equal),
            "<" => Ok(Comparison::LessOrEqual),
            ">" => Ok(Comparison::Greater),
            _ => Err(DecisionTreeError::ParseString(
                s.to_string(),
                "Comparison".to_string(),
                items_to_strings(vec!["=", "<", ">"]),
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DecisionCondition {
    pub attribute_index: usize,
    pub comparison: Comparison,
    pub value: Attribute,
}

impl DecisionCondition {
    /// Checked constructor, equality pairs with a discrete value and the
    /// threshold comparisons with a continuous one.
    pub fn new(attribute_index: usize, comparison: Comparison, value: Attribute) -> Result<Self, DecisionTreeError> {
        let consistent = matches!(
            (&comparison, &value),
            (Comparison::Equal, Attribute::Discrete(_))
                | (Comparison::LessOrEqual, Attribute::Continuous(_))
                | (Comparison::Greater, Attribute::Continuous(_))
        );
        if !consistent {
            return Err(DecisionTreeError::InvalidParameter(
                "value".to_string(),
                format!("a value matching comparison {}", comparison.symbol()),
                format!("{:?}", value),
            ));
        }
        Ok(DecisionCondition {
            attribute_index,
            comparison,
            value,
        })
    }

    pub fn equal(attribute_index: usize, value: impl Into<String>) -> Self {
        DecisionCondition {
            attribute_index,
            comparison: Comparison::Equal,
            value: Attribute::Discrete(value.into()),
        }
    }

    pub fn less_or_equal(attribute_index: usize, threshold: f64) -> Self {
        DecisionCondition {
            attribute_index,
            comparison: Comparison::LessOrEqual,
            value: Attribute::Continuous(threshold),
        }
    }

    pub fn greater(attribute_index: usize, threshold: f64) -> Self {
        DecisionCondition {
            attribute_index,
            comparison: Comparison::Greater,
            value: Attribute::Continuous(threshold),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(&self.value, Attribute::Discrete(v) if v == DISCRETE_WILDCARD)
    }

    /// Does the instance take this branch. A missing attribute or a type
    /// mismatch never satisfies the condition.
    pub fn satisfy(&self, instance: &Instance) -> bool {
        let attribute = match instance.attribute(self.attribute_index) {
            Some(a) => a,
            None => return false,
        };
        match (&self.value, attribute, self.comparison) {
            (Attribute::Discrete(v), Attribute::Discrete(x), Comparison::Equal) => {
                v == DISCRETE_WILDCARD || v == x
            }
            (Attribute::Continuous(t), Attribute::Continuous(x), Comparison::LessOrEqual) => x <= t,
            (Attribute::Continuous(t), Attribute::Continuous(x), Comparison::Greater) => x > t,
            _ => false,
        }
    }
}

impl fmt::Display for DecisionCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute_index, self.comparison.symbol(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(outlook: &str, temperature: f64) -> Instance {
        Instance::new("play", vec![outlook.into(), temperature.into()])
    }

    #[test]
    fn test_discrete_condition() {
        let c = DecisionCondition::equal(0, "sunny");
        assert!(c.satisfy(&weather("sunny", 70.0)));
        assert!(!c.satisfy(&weather("rainy", 70.0)));
        assert!(DecisionCondition::equal(0, "*").satisfy(&weather("cloudy", 70.0)));
    }

    #[test]
    fn test_continuous_condition() {
        let le = DecisionCondition::less_or_equal(1, 70.0);
        let gt = DecisionCondition::greater(1, 70.0);
        assert!(le.satisfy(&weather("sunny", 70.0)));
        assert!(!gt.satisfy(&weather("sunny", 70.0)));
        assert!(gt.satisfy(&weather("sunny", 70.5)));
        assert!(!le.satisfy(&weather("sunny", f64::NAN)));
        assert!(!gt.satisfy(&weather("sunny", f64::NAN)));
    }

    #[test]
    fn test_mismatch_never_satisfies() {
        assert!(!DecisionCondition::equal(1, "70").satisfy(&weather("sunny", 70.0)));
        assert!(!DecisionCondition::greater(0, 1.0).satisfy(&weather("sunny", 70.0)));
        assert!(!DecisionCondition::equal(5, "sunny").satisfy(&weather("sunny", 70.0)));
    }

    #[test]
    fn test_checked_constructor() {
        assert!(DecisionCondition::new(0, Comparison::Equal, "a".into()).is_ok());
        assert!(DecisionCondition::new(0, Comparison::Equal, 1.0.into()).is_err());
        assert!(DecisionCondition::new(0, Comparison::Greater, "a".into()).is_err());
        assert_eq!(DecisionCondition::less_or_equal(2, 4.5).to_string(), "2 < 4.5");
    }
}
