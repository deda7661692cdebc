//! Instance Lists
//!
//! Ordered collections of labeled instances and their text file format:
//!
//! ```text
//! DISCRETE CONTINUOUS ...     one token per attribute, in positional order
//! <instance count>
//! v1,v2,...,label             one line per instance
//! v1,v2,...,label;c1;c2       a composite instance lists its candidate labels after the label
//! ```
use crate::attribute::AttributeType;
use crate::constants::{CANDIDATE_SEPARATOR, VALUE_SEPARATOR};
use crate::distribution::DiscreteDistribution;
use crate::errors::DecisionTreeError;
use crate::instance::Instance;
use crate::serialize::LineReader;
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::ops::Index;
use std::str::FromStr;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct InstanceList {
    instances: Vec<Instance>,
}

impl InstanceList {
    pub fn new() -> Self {
        InstanceList::default()
    }

    pub fn add(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn get(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    pub fn size(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Attribute kinds, taken from the first instance.
    pub fn attribute_types(&self) -> Vec<AttributeType> {
        self.instances.first().map(|i| i.attribute_types()).unwrap_or_default()
    }

    /// Counts of the ground-truth class labels.
    pub fn class_distribution(&self) -> DiscreteDistribution {
        DiscreteDistribution::from_labels(self.instances.iter().map(|i| i.class_label.as_str()))
    }

    /// Shuffle in place with a seeded generator, the same seed gives the same order.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.instances.shuffle(&mut rng);
    }

    /// Shuffle a copy and split it in two, the first part holding `ratio` of the instances.
    ///
    /// * `ratio` - Fraction of instances in the first part, between 0 and 1.
    /// * `seed` - Integer value used to seed the shuffle.
    pub fn split(&self, ratio: f64, seed: u64) -> Result<(InstanceList, InstanceList), DecisionTreeError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(DecisionTreeError::InvalidParameter(
                "ratio".to_string(),
                "a value between 0 and 1".to_string(),
                ratio.to_string(),
            ));
        }
        let mut shuffled = self.clone();
        shuffled.shuffle(seed);
        let n_first = (ratio * self.size() as f64).round() as usize;
        let second = shuffled.instances.split_off(n_first);
        Ok((shuffled, InstanceList { instances: second }))
    }

    /// Parse one instance line given the declared attribute kinds.
    pub fn parse_instance(line: &str, attribute_types: &[AttributeType]) -> Result<Instance, DecisionTreeError> {
        let items: Vec<&str> = line.split(VALUE_SEPARATOR).collect();
        if items.len() != attribute_types.len() + 1 {
            return Err(DecisionTreeError::InvalidParameter(
                "instance".to_string(),
                format!("{} values and a class label", attribute_types.len()),
                format!("{} fields", items.len()),
            ));
        }
        let attributes = attribute_types
            .iter()
            .zip(items.iter())
            .map(|(t, v)| t.parse_value(v))
            .collect::<Result<Vec<_>, _>>()?;
        let mut labels = items[items.len() - 1].split(CANDIDATE_SEPARATOR);
        let class_label = labels.next().unwrap_or_default();
        let candidates: Vec<String> = labels.map(|l| l.to_string()).collect();
        Ok(Instance::composite(class_label, attributes, candidates))
    }

    pub fn read<R: BufRead>(reader: R) -> Result<Self, DecisionTreeError> {
        let mut reader = LineReader::new(reader);
        let header = reader.next_line()?;
        let attribute_types = header
            .split_whitespace()
            .map(AttributeType::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| reader.malformed(e.to_string()))?;
        let n = reader.next_count("instance count")?;
        let mut instances = Vec::with_capacity(n);
        for _ in 0..n {
            let l = reader.next_line()?;
            let instance = Self::parse_instance(&l, &attribute_types).map_err(|e| reader.malformed(e.to_string()))?;
            instances.push(instance);
        }
        Ok(InstanceList { instances })
    }

    /// Load an instance list from a path.
    ///
    /// * `path` - Path to load the instances from.
    pub fn load(path: &str) -> Result<Self, DecisionTreeError> {
        let file = File::open(path).map_err(|e| DecisionTreeError::UnableToRead(format!("{}: {}", path, e)))?;
        let list = Self::read(BufReader::new(file))?;
        info!("Loaded {} instances from {}.", list.size(), path);
        Ok(list)
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let header: Vec<String> = self.attribute_types().iter().map(|t| t.to_string()).collect();
        writeln!(w, "{}", header.join(" "))?;
        writeln!(w, "{}", self.size())?;
        for instance in &self.instances {
            writeln!(w, "{}", instance)?;
        }
        Ok(())
    }

    /// Save the instance list as text.
    ///
    /// * `path` - Path to save the instances.
    pub fn save(&self, path: &str) -> Result<(), DecisionTreeError> {
        let file = File::create(path).map_err(|e| DecisionTreeError::UnableToWrite(format!("{}: {}", path, e)))?;
        let mut w = BufWriter::new(file);
        self.write(&mut w)
            .and_then(|_| w.flush())
            .map_err(|e| DecisionTreeError::UnableToWrite(e.to_string()))
    }
}

impl From<Vec<Instance>> for InstanceList {
    fn from(instances: Vec<Instance>) -> Self {
        InstanceList { instances }
    }
}

impl FromIterator<Instance> for InstanceList {
    fn from_iter<I: IntoIterator<Item = Instance>>(iter: I) -> Self {
        InstanceList {
            instances: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InstanceList {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}

impl Index<usize> for InstanceList {
    type Output = Instance;

    fn index(&self, index: usize) -> &Self::Output {
        &self.instances[index]
    }
}
