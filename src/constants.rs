/// Condition line written for a node that is not reached through a test (the root).
pub const ROOT_CONDITION: &str = "-1";
/// Discrete condition value that matches any discrete attribute value.
pub const DISCRETE_WILDCARD: &str = "*";
/// Separator between a class label and its candidate labels in instance files.
pub const CANDIDATE_SEPARATOR: char = ';';
/// Separator between attribute values in instance files.
pub const VALUE_SEPARATOR: char = ',';
/// Token declaring a discrete attribute in an instance file header.
pub const DISCRETE_TOKEN: &str = "DISCRETE";
/// Token declaring a continuous attribute in an instance file header.
pub const CONTINUOUS_TOKEN: &str = "CONTINUOUS";
/// Default indentation unit for generated code.
pub const DEFAULT_INDENT: &str = "\t";
