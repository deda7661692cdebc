// Modules
pub mod attribute;
pub mod codegen;
pub mod condition;
pub mod constants;
pub mod data;
pub mod distribution;
pub mod errors;
pub mod instance;
pub mod metric;
pub mod model;
pub mod node;
pub mod serialize;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use attribute::{Attribute, AttributeType};
pub use data::InstanceList;
pub use instance::Instance;
pub use model::Model;
pub use node::{DecisionNode, NodeType};
pub use tree::DecisionTree;
