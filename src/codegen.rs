//! Code Generation
//!
//! Compiles a tree into a standalone function that takes the fields of a test
//! record as strings and returns the predicted label, or an empty string when
//! no branch matches.
use crate::attribute::Attribute;
use crate::condition::{Comparison, DecisionCondition};
use crate::constants::DEFAULT_INDENT;
use crate::errors::DecisionTreeError;
use crate::node::DecisionNode;
use crate::utils::{escape_literal, fmt_float, items_to_strings, tabs};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::str::FromStr;

/// Language of the generated function.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum CodeTarget {
    /// `pub fn <name>(test_data: &[&str]) -> String`
    Rust,
    /// `public static String <name>(String[] testData)`
    Java,
}

impl FromStr for CodeTarget {
    type Err = DecisionTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rust" => Ok(CodeTarget::Rust),
            "Java" => Ok(CodeTarget::Java),
            _ => Err(DecisionTreeError::ParseString(
                s.to_string(),
                "CodeTarget".to_string(),
                items_to_strings(vec!["Rust", "Java"]),
            )),
        }
    }
}

/// Options for generated test code.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct TestCodeConfig {
    /// Language of the generated function.
    #[serde(default = "default_target")]
    pub target: CodeTarget,
    /// Indentation unit, repeated once per tree level.
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_target() -> CodeTarget {
    CodeTarget::Rust
}
fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

impl Default for TestCodeConfig {
    fn default() -> Self {
        TestCodeConfig {
            target: default_target(),
            indent: default_indent(),
        }
    }
}

impl TestCodeConfig {
    /// Set the target language.
    /// * `target` - Language of the generated function.
    pub fn set_target(mut self, target: CodeTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the indentation unit.
    /// * `indent` - String repeated once per nesting level.
    pub fn set_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }
}

fn validate_method_name(method_name: &str) -> Result<(), DecisionTreeError> {
    let mut chars = method_name.chars();
    let valid = match chars.next() {
        Some(c) => (c.is_ascii_alphabetic() || c == '_') && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DecisionTreeError::InvalidParameter(
            "method_name".to_string(),
            "an identifier".to_string(),
            format!("{:?}", method_name),
        ))
    }
}

/// Floating point literal, non-finite values use the target's named constants.
fn float_literal(v: f64, target: CodeTarget) -> String {
    match (target, v) {
        (_, v) if v.is_finite() => fmt_float(v),
        (CodeTarget::Rust, v) if v.is_nan() => "f64::NAN".to_string(),
        (CodeTarget::Rust, v) if v > 0.0 => "f64::INFINITY".to_string(),
        (CodeTarget::Rust, _) => "f64::NEG_INFINITY".to_string(),
        (CodeTarget::Java, v) if v.is_nan() => "Double.NaN".to_string(),
        (CodeTarget::Java, v) if v > 0.0 => "Double.POSITIVE_INFINITY".to_string(),
        (CodeTarget::Java, _) => "Double.NEGATIVE_INFINITY".to_string(),
    }
}

fn condition_code(condition: &DecisionCondition, target: CodeTarget) -> String {
    let i = condition.attribute_index;
    if condition.is_wildcard() {
        return match target {
            CodeTarget::Rust => format!("test_data.get({}).is_some()", i),
            CodeTarget::Java => "true".to_string(),
        };
    }
    match (condition.comparison, &condition.value) {
        (Comparison::Equal, Attribute::Discrete(v)) => match target {
            CodeTarget::Rust => format!("test_data.get({}) == Some(&\"{}\")", i, escape_literal(v)),
            CodeTarget::Java => format!("testData[{}].equals(\"{}\")", i, escape_literal(v)),
        },
        (Comparison::LessOrEqual | Comparison::Greater, Attribute::Continuous(t)) => {
            let op = if condition.comparison == Comparison::Greater { ">" } else { "<=" };
            let t = float_literal(*t, target);
            match target {
                CodeTarget::Rust => format!(
                    "test_data.get({}).and_then(|v| v.parse::<f64>().ok()).map_or(false, |x| x {} {})",
                    i, op, t
                ),
                CodeTarget::Java => format!("Double.parseDouble(testData[{}]) {} {}", i, op, t),
            }
        }
        // Never satisfied, see `DecisionCondition::satisfy`.
        _ => "false".to_string(),
    }
}

fn return_code(label: &str, target: CodeTarget) -> String {
    match target {
        CodeTarget::Rust => format!("return \"{}\".to_string();", escape_literal(label)),
        CodeTarget::Java => format!("return \"{}\";", escape_literal(label)),
    }
}

/// Children become one `if` / `else if` chain, so the generated code commits
/// to the first matching child the same way prediction does.
fn write_node_code<W: Write>(w: &mut W, node: &DecisionNode, level: usize, config: &TestCodeConfig) -> io::Result<()> {
    let indent = tabs(&config.indent, level);
    if node.is_leaf() {
        return writeln!(w, "{}{}", indent, return_code(&node.class_label, config.target));
    }
    let mut first = true;
    for child in &node.children {
        // A child without a condition can never be reached.
        let condition = match &child.condition {
            Some(c) => c,
            None => continue,
        };
        let code = condition_code(condition, config.target);
        match (config.target, first) {
            (CodeTarget::Rust, true) => writeln!(w, "{}if {} {{", indent, code)?,
            (CodeTarget::Rust, false) => writeln!(w, "{}}} else if {} {{", indent, code)?,
            (CodeTarget::Java, true) => writeln!(w, "{}if ({}){{", indent, code)?,
            (CodeTarget::Java, false) => writeln!(w, "{}}} else if ({}){{", indent, code)?,
        }
        first = false;
        write_node_code(w, child, level + 1, config)?;
    }
    if !first {
        writeln!(w, "{}}}", indent)?;
    }
    Ok(())
}

/// Write a function named `method_name` that classifies a test record the way `root` does.
pub fn write_test_code<W: Write>(
    w: &mut W,
    root: &DecisionNode,
    method_name: &str,
    config: &TestCodeConfig,
) -> Result<(), DecisionTreeError> {
    validate_method_name(method_name)?;
    let indent = tabs(&config.indent, 1);
    let write = |w: &mut W| -> io::Result<()> {
        match config.target {
            CodeTarget::Rust => {
                writeln!(w, "pub fn {}(test_data: &[&str]) -> String {{", method_name)?;
                write_node_code(w, root, 1, config)?;
                writeln!(w, "{}String::new()", indent)?;
            }
            CodeTarget::Java => {
                writeln!(w, "public static String {}(String[] testData){{", method_name)?;
                write_node_code(w, root, 1, config)?;
                writeln!(w, "{}return \"\";", indent)?;
            }
        }
        writeln!(w, "}}")
    };
    write(w).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::DiscreteDistribution;
    use crate::instance::Instance;
    use crate::node::tests::weather_node;

    fn generate(root: &DecisionNode, config: &TestCodeConfig) -> String {
        let mut buf = Vec::new();
        write_test_code(&mut buf, root, "classify", config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_leaf_rust() {
        let leaf = DecisionNode::leaf(DiscreteDistribution::from_counts([("play", 4)]));
        let code = generate(&leaf, &TestCodeConfig::default());
        assert_eq!(
            code,
            "pub fn classify(test_data: &[&str]) -> String {\n\treturn \"play\".to_string();\n\tString::new()\n}\n"
        );
    }

    #[test]
    fn test_single_leaf_java() {
        let leaf = DecisionNode::leaf(DiscreteDistribution::from_counts([("play", 4)]));
        let config = TestCodeConfig::default().set_target(CodeTarget::Java);
        let code = generate(&leaf, &config);
        assert_eq!(
            code,
            "public static String classify(String[] testData){\n\treturn \"play\";\n\treturn \"\";\n}\n"
        );
    }

    #[test]
    fn test_nested_rust() {
        let code = generate(&weather_node(), &TestCodeConfig::default().set_indent("    "));
        let expected = [
            "pub fn classify(test_data: &[&str]) -> String {",
            "    if test_data.get(0) == Some(&\"sunny\") {",
            "        return \"play\".to_string();",
            "    } else if test_data.get(0) == Some(&\"rainy\") {",
            "        if test_data.get(1).and_then(|v| v.parse::<f64>().ok()).map_or(false, |x| x <= 75.0) {",
            "            return \"play\".to_string();",
            "        } else if test_data.get(1).and_then(|v| v.parse::<f64>().ok()).map_or(false, |x| x > 75.0) {",
            "            return \"no-play\".to_string();",
            "        }",
            "    }",
            "    String::new()",
            "}",
        ];
        assert_eq!(code.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_nested_java() {
        let config = TestCodeConfig::default().set_target(CodeTarget::Java);
        let code = generate(&weather_node(), &config);
        assert!(code.contains("\tif (testData[0].equals(\"sunny\")){\n\t\treturn \"play\";\n"));
        assert!(code.contains("\t} else if (testData[0].equals(\"rainy\")){\n"));
        assert!(code.contains("\t\t} else if (Double.parseDouble(testData[1]) > 75.0){\n"));
        assert!(code.ends_with("\treturn \"\";\n}\n"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let leaf = DecisionNode::leaf_with_label("say \"yes\"", DiscreteDistribution::new());
        let code = generate(&leaf, &TestCodeConfig::default());
        assert!(code.contains("return \"say \\\"yes\\\"\".to_string();"));
    }

    #[test]
    fn test_invalid_method_name() {
        let leaf = DecisionNode::leaf(DiscreteDistribution::new());
        let mut buf = Vec::new();
        assert!(write_test_code(&mut buf, &leaf, "1abc", &TestCodeConfig::default()).is_err());
        assert!(write_test_code(&mut buf, &leaf, "", &TestCodeConfig::default()).is_err());
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!(CodeTarget::from_str("Java").unwrap(), CodeTarget::Java);
        assert!(CodeTarget::from_str("Python").is_err());
        let config: TestCodeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TestCodeConfig::default());
    }

    #[test]
    fn test_first_matching_child_wins() {
        // Prediction stops at the sunny branch even when no grandchild matches,
        // the wildcard sibling must not be tried afterwards.
        let hot = DecisionNode::leaf(DiscreteDistribution::from_counts([("no-play", 2)]))
            .with_condition(DecisionCondition::equal(1, "hot"));
        let sunny = DecisionNode::internal(DiscreteDistribution::from_counts([("no-play", 2)]), vec![hot])
            .unwrap()
            .with_condition(DecisionCondition::equal(0, "sunny"));
        let any = DecisionNode::leaf(DiscreteDistribution::from_counts([("play", 3)]))
            .with_condition(DecisionCondition::equal(0, "*"));
        let root =
            DecisionNode::internal(DiscreteDistribution::from_counts([("play", 3), ("no-play", 2)]), vec![sunny, any])
                .unwrap();
        let mild = Instance::new("", vec!["sunny".into(), "mild".into()]);
        assert_eq!(root.predict(&mild), None);

        let code = generate(&root, &TestCodeConfig::default());
        let expected = [
            "pub fn classify(test_data: &[&str]) -> String {",
            "\tif test_data.get(0) == Some(&\"sunny\") {",
            "\t\tif test_data.get(1) == Some(&\"hot\") {",
            "\t\t\treturn \"no-play\".to_string();",
            "\t\t}",
            "\t} else if test_data.get(0).is_some() {",
            "\t\treturn \"play\".to_string();",
            "\t}",
            "\tString::new()",
            "}",
        ];
        assert_eq!(code.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_non_finite_thresholds() {
        let low = DecisionNode::leaf(DiscreteDistribution::from_counts([("a", 1)]))
            .with_condition(DecisionCondition::less_or_equal(0, f64::INFINITY));
        let high = DecisionNode::leaf(DiscreteDistribution::from_counts([("b", 1)]))
            .with_condition(DecisionCondition::greater(0, f64::NEG_INFINITY));
        let never = DecisionNode::leaf(DiscreteDistribution::from_counts([("c", 1)]))
            .with_condition(DecisionCondition::greater(0, f64::NAN));
        let root = DecisionNode::internal(DiscreteDistribution::new(), vec![low, high, never]).unwrap();

        let code = generate(&root, &TestCodeConfig::default());
        assert!(code.contains("map_or(false, |x| x <= f64::INFINITY)"));
        assert!(code.contains("map_or(false, |x| x > f64::NEG_INFINITY)"));
        assert!(code.contains("map_or(false, |x| x > f64::NAN)"));
        assert!(!code.contains("inf ") && !code.contains("NaN"));

        let code = generate(&root, &TestCodeConfig::default().set_target(CodeTarget::Java));
        assert!(code.contains("Double.parseDouble(testData[0]) <= Double.POSITIVE_INFINITY"));
        assert!(code.contains("Double.parseDouble(testData[0]) > Double.NEGATIVE_INFINITY"));
        assert!(code.contains("Double.parseDouble(testData[0]) > Double.NaN"));
    }
}
