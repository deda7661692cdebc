use crate::codegen::{write_test_code, TestCodeConfig};
use crate::data::InstanceList;
use crate::errors::DecisionTreeError;
use crate::instance::Instance;
use crate::model::Model;
use crate::node::{DecisionNode, NodeType};
use crate::serialize::{read_node, write_node, LineReader};
use hashbrown::HashMap;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::str::FromStr;

/// A classification tree. The root is the only state.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DecisionTree {
    root: DecisionNode,
}

impl DecisionTree {
    /// Wrap an already built root node.
    pub fn new(root: DecisionNode) -> Self {
        DecisionTree { root }
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Read a tree from its text snapshot. Nothing after the root's record is read.
    pub fn read_txt<R: BufRead>(reader: R) -> Result<Self, DecisionTreeError> {
        let mut reader = LineReader::new(reader);
        let root = read_node(&mut reader)?;
        Ok(DecisionTree { root })
    }

    /// Load a tree from a text snapshot file.
    ///
    /// * `path` - Path to load the tree from.
    pub fn load_txt(path: &str) -> Result<Self, DecisionTreeError> {
        let file = File::open(path).map_err(|e| DecisionTreeError::UnableToRead(format!("{}: {}", path, e)))?;
        let tree = Self::read_txt(BufReader::new(file))?;
        info!(
            "Loaded a tree with {} nodes and depth {} from {}.",
            tree.n_nodes(),
            tree.depth(),
            path
        );
        Ok(tree)
    }

    /// Text snapshot as a string.
    pub fn to_txt(&self) -> Result<String, DecisionTreeError> {
        let mut buf = Vec::new();
        self.write_txt(&mut buf)?;
        String::from_utf8(buf).map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
    }

    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    pub fn n_internal(&self) -> usize {
        self.root.n_internal()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Reduced-error pruning of the whole tree against a held-out set.
    ///
    /// Nodes are visited top-down in pre-order. Each internal node is tagged
    /// as a leaf on trial; the tag is kept when the accuracy of the whole tree
    /// on `prune_set` does not drop, otherwise it is reverted and the children
    /// are visited.
    ///
    /// * `prune_set` - Labeled instances not used for training.
    pub fn prune(&mut self, prune_set: &InstanceList) {
        self.prune_subtree(&[], prune_set);
    }

    /// Prune starting at the node reached by following `path` (child positions) from the root.
    pub fn prune_subtree(&mut self, path: &[usize], prune_set: &InstanceList) {
        let old_internal = self.n_internal();
        let mut path = path.to_vec();
        self.prune_node(&mut path, prune_set);
        info!(
            "pruning: n_internal: {} -> {}, prune set size: {}",
            old_internal,
            self.n_internal(),
            prune_set.size()
        );
    }

    fn set_node_type(&mut self, path: &[usize], node_type: NodeType) {
        if let Some(node) = self.root.descendant_mut(path) {
            node.node_type = node_type;
        }
    }

    fn prune_node(&mut self, path: &mut Vec<usize>, prune_set: &InstanceList) {
        let n_children = match self.root.descendant(path.as_slice()) {
            Some(node) if !node.is_leaf() => node.children.len(),
            _ => return,
        };
        let before = self.test_classifier(prune_set).accuracy;
        self.set_node_type(path.as_slice(), NodeType::Leaf);
        let after = self.test_classifier(prune_set).accuracy;
        if after < before {
            self.set_node_type(path.as_slice(), NodeType::Internal);
            for i in 0..n_children {
                path.push(i);
                self.prune_node(path, prune_set);
                path.pop();
            }
        } else {
            debug!("pruned node {:?}: accuracy {:.4} -> {:.4}", path, before, after);
        }
    }

    /// Drop the subtrees hidden behind pruned nodes.
    pub fn remove_hidden_children(&mut self) {
        self.root.remove_hidden_children();
    }

    /// Write a standalone classification function for this tree.
    ///
    /// * `w` - Destination of the generated code.
    /// * `method_name` - Name of the generated function.
    /// * `config` - Target language and indentation.
    pub fn write_test_code<W: Write>(
        &self,
        w: &mut W,
        method_name: &str,
        config: &TestCodeConfig,
    ) -> Result<(), DecisionTreeError> {
        write_test_code(w, &self.root, method_name, config)
    }

    /// Generate a standalone classification function into a file with the default configuration.
    /// Failures are logged and do not abort the caller.
    pub fn generate_test_code(&self, path: &str, method_name: &str) {
        self.generate_test_code_with_config(path, method_name, &TestCodeConfig::default())
    }

    /// Generate a standalone classification function into a file.
    /// Failures are logged and do not abort the caller.
    ///
    /// * `path` - Path of the generated source file.
    /// * `method_name` - Name of the generated function.
    /// * `config` - Target language and indentation.
    pub fn generate_test_code_with_config(&self, path: &str, method_name: &str, config: &TestCodeConfig) {
        let result = File::create(path)
            .map_err(|e| DecisionTreeError::UnableToWrite(format!("{}: {}", path, e)))
            .and_then(|file| {
                let mut w = BufWriter::new(file);
                self.write_test_code(&mut w, method_name, config)?;
                w.flush().map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
            });
        match result {
            Ok(_) => info!("Generated {} into {}.", method_name, path),
            Err(e) => error!("Unable to generate test code: {}", e),
        }
    }
}

impl Model for DecisionTree {
    /// Predict with the root; a composite instance falls back to its first candidate label.
    fn predict(&self, instance: &Instance) -> Option<String> {
        match self.root.predict(instance) {
            Some(label) => Some(label.to_string()),
            None => instance
                .possible_class_labels()
                .and_then(|labels| labels.first())
                .cloned(),
        }
    }

    fn predict_probability(&self, instance: &Instance) -> HashMap<String, f64> {
        self.root.predict_probability_distribution(instance)
    }

    fn write_txt<W: Write>(&self, w: &mut W) -> Result<(), DecisionTreeError> {
        write_node(w, &self.root)
    }
}

impl FromStr for DecisionTree {
    type Err = DecisionTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::read_txt(s.as_bytes())
    }
}

impl Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<(usize, &DecisionNode)> = vec![(0, &self.root)];
        let mut r = String::new();
        while let Some((depth, node)) = print_buffer.pop() {
            r += format!("{}{}\n", "      ".repeat(depth).as_str(), node).as_str();
            if !node.is_leaf() {
                for child in node.children.iter().rev() {
                    print_buffer.push((depth + 1, child));
                }
            }
        }
        write!(f, "{}", r)
    }
}
