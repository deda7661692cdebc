use crate::condition::DecisionCondition;
use crate::distribution::DiscreteDistribution;
use crate::errors::DecisionTreeError;
use crate::instance::Instance;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural role of a node. Pruning flips this tag without touching the children.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum NodeType {
    Leaf,
    Internal,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DecisionNode {
    /// Test that sends an instance from the parent into this node, `None` on the root.
    pub condition: Option<DecisionCondition>,
    pub node_type: NodeType,
    /// Majority class of the training instances that reached this node.
    pub class_label: String,
    pub distribution: DiscreteDistribution,
    /// Ordered children, the first satisfied condition wins. Still attached
    /// while the node is tagged as a leaf.
    pub children: Vec<DecisionNode>,
}

impl DecisionNode {
    /// Create a leaf whose label is the most frequent item of `distribution`.
    pub fn leaf(distribution: DiscreteDistribution) -> Self {
        let class_label = distribution.max_item().unwrap_or_default().to_string();
        DecisionNode {
            condition: None,
            node_type: NodeType::Leaf,
            class_label,
            distribution,
            children: Vec::new(),
        }
    }

    /// Create a leaf carrying an explicit label.
    pub fn leaf_with_label(class_label: impl Into<String>, distribution: DiscreteDistribution) -> Self {
        DecisionNode {
            condition: None,
            node_type: NodeType::Leaf,
            class_label: class_label.into(),
            distribution,
            children: Vec::new(),
        }
    }

    /// Create an internal node. Its label, used once the node is pruned, is the
    /// most frequent item of `distribution`.
    pub fn internal(
        distribution: DiscreteDistribution,
        children: Vec<DecisionNode>,
    ) -> Result<Self, DecisionTreeError> {
        if children.is_empty() {
            return Err(DecisionTreeError::InvalidParameter(
                "children".to_string(),
                "at least one child for an internal node".to_string(),
                "0".to_string(),
            ));
        }
        let class_label = distribution.max_item().unwrap_or_default().to_string();
        Ok(DecisionNode {
            condition: None,
            node_type: NodeType::Internal,
            class_label,
            distribution,
            children,
        })
    }

    /// Attach the test that routes instances into this node.
    pub fn with_condition(mut self, condition: DecisionCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node_type == NodeType::Leaf
    }

    /// First child whose condition the instance satisfies.
    pub fn get_child(&self, instance: &Instance) -> Option<&DecisionNode> {
        self.children
            .iter()
            .find(|c| c.condition.as_ref().is_some_and(|cond| cond.satisfy(instance)))
    }

    /// Predicted label, `None` when no child matches along the path.
    pub fn predict(&self, instance: &Instance) -> Option<&str> {
        let mut node = self;
        loop {
            if node.is_leaf() {
                return Some(node.class_label.as_str());
            }
            node = node.get_child(instance)?;
        }
    }

    /// Normalized label distribution of the leaf the instance reaches, empty
    /// when no child matches along the path.
    pub fn predict_probability_distribution(&self, instance: &Instance) -> HashMap<String, f64> {
        let mut node = self;
        loop {
            if node.is_leaf() {
                return node.distribution.probability_distribution();
            }
            match node.get_child(instance) {
                Some(child) => node = child,
                None => return HashMap::new(),
            }
        }
    }

    /// Follow a path of child positions. Children hidden behind a leaf tag are still reachable.
    pub fn descendant(&self, path: &[usize]) -> Option<&DecisionNode> {
        path.iter().try_fold(self, |node, i| node.children.get(*i))
    }

    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut DecisionNode> {
        path.iter().try_fold(self, |node, i| node.children.get_mut(*i))
    }

    /// Number of nodes reachable from here during prediction.
    pub fn n_nodes(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            1 + self.children.iter().map(|c| c.n_nodes()).sum::<usize>()
        }
    }

    /// Number of internal nodes reachable from here during prediction.
    pub fn n_internal(&self) -> usize {
        if self.is_leaf() {
            0
        } else {
            1 + self.children.iter().map(|c| c.n_internal()).sum::<usize>()
        }
    }

    /// Number of reachable leaves.
    pub fn n_leaves(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(|c| c.n_leaves()).sum()
        }
    }

    /// Depth of the reachable tree, a single leaf has depth 0.
    pub fn depth(&self) -> usize {
        if self.is_leaf() {
            0
        } else {
            1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
        }
    }

    /// Drop children hidden behind a leaf tag, recursively.
    pub fn remove_hidden_children(&mut self) {
        if self.is_leaf() {
            self.children.clear();
        } else {
            self.children.iter_mut().for_each(|c| c.remove_hidden_children());
        }
    }
}

impl fmt::Display for DecisionNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.condition {
            Some(c) => write!(f, "[{}] ", c)?,
            None => write!(f, "[root] ")?,
        }
        if self.is_leaf() {
            write!(f, "leaf={},n={}", self.class_label, self.distribution.sum())
        } else {
            write!(
                f,
                "children={},majority={},n={}",
                self.children.len(),
                self.class_label,
                self.distribution.sum()
            )
        }
    }
}
