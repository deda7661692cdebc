//! Instance
//!
//! A labeled feature vector. A composite instance additionally carries the
//! candidate labels that the true label is known to be one of.
use crate::attribute::{Attribute, AttributeType};
use crate::constants::{CANDIDATE_SEPARATOR, VALUE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Instance {
    pub class_label: String,
    pub attributes: Vec<Attribute>,
    /// Empty for a plain instance.
    possible_class_labels: Vec<String>,
}

impl Instance {
    pub fn new(class_label: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Instance {
            class_label: class_label.into(),
            attributes,
            possible_class_labels: Vec::new(),
        }
    }

    /// Create a composite instance. An empty candidate list gives a plain instance.
    pub fn composite(
        class_label: impl Into<String>,
        attributes: Vec<Attribute>,
        possible_class_labels: Vec<String>,
    ) -> Self {
        Instance {
            class_label: class_label.into(),
            attributes,
            possible_class_labels,
        }
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn attribute_size(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_types(&self) -> Vec<AttributeType> {
        self.attributes.iter().map(|a| a.attribute_type()).collect()
    }

    pub fn is_composite(&self) -> bool {
        !self.possible_class_labels.is_empty()
    }

    /// Candidate labels of a composite instance, `None` for a plain instance.
    pub fn possible_class_labels(&self) -> Option<&[String]> {
        if self.possible_class_labels.is_empty() {
            None
        } else {
            Some(&self.possible_class_labels)
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for a in &self.attributes {
            write!(f, "{}{}", a, VALUE_SEPARATOR)?;
        }
        write!(f, "{}", self.class_label)?;
        for label in &self.possible_class_labels {
            write!(f, "{}{}", CANDIDATE_SEPARATOR, label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_instance() {
        let instance = Instance::new("play", vec!["sunny".into(), 75.0.into()]);
        assert!(!instance.is_composite());
        assert!(instance.possible_class_labels().is_none());
        assert_eq!(instance.attribute_size(), 2);
        assert_eq!(instance.to_string(), "sunny,75.0,play");
    }

    #[test]
    fn test_composite_instance() {
        let instance = Instance::composite(
            "no-play",
            vec!["cloudy".into()],
            vec!["no-play".to_string(), "play".to_string()],
        );
        assert!(instance.is_composite());
        assert_eq!(instance.possible_class_labels().unwrap()[0], "no-play");
        assert_eq!(instance.to_string(), "cloudy,no-play;no-play;play");
    }
}
