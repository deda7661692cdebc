//! Model
//!
//! Contract shared by every classifier: prediction, probability estimation,
//! a line oriented text snapshot and an opaque whole-model snapshot.
use crate::data::InstanceList;
use crate::errors::DecisionTreeError;
use crate::instance::Instance;
use crate::metric::{ClassificationPerformance, ConfusionMatrix};
use hashbrown::HashMap;
use log::info;
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;

pub trait Model: Serialize + DeserializeOwned + Sync {
    /// Predicted class label, `None` when the model cannot decide.
    fn predict(&self, instance: &Instance) -> Option<String>;

    /// Probability of each class label, empty when no estimate is available.
    fn predict_probability(&self, instance: &Instance) -> HashMap<String, f64>;

    /// Write the text snapshot of the model.
    fn write_txt<W: Write>(&self, w: &mut W) -> Result<(), DecisionTreeError>;

    /// Save the text snapshot of the model to a file. The file is only
    /// created once the whole snapshot has been written.
    ///
    /// * `path` - Path to save the model.
    fn save_txt(&self, path: &str) -> Result<(), DecisionTreeError> {
        let mut buf = Vec::new();
        self.write_txt(&mut buf)?;
        match fs::write(path, buf) {
            Err(e) => Err(DecisionTreeError::UnableToWrite(format!("{}: {}", path, e))),
            Ok(_) => {
                info!("Saved model text to {}.", path);
                Ok(())
            }
        }
    }

    /// Dump the model as a json object.
    fn json_dump(&self) -> Result<String, DecisionTreeError> {
        match serde_json::to_string(self) {
            Ok(s) => Ok(s),
            Err(e) => Err(DecisionTreeError::UnableToWrite(e.to_string())),
        }
    }

    /// Load the model from a json string.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, DecisionTreeError> {
        match serde_json::from_str::<Self>(json_str) {
            Ok(m) => Ok(m),
            Err(e) => Err(DecisionTreeError::UnableToRead(e.to_string())),
        }
    }

    /// Save the whole model as a json object to a file.
    ///
    /// * `path` - Path to save the model.
    fn save(&self, path: &str) -> Result<(), DecisionTreeError> {
        let model = self.json_dump()?;
        match fs::write(path, model) {
            Err(e) => Err(DecisionTreeError::UnableToWrite(e.to_string())),
            Ok(_) => Ok(()),
        }
    }

    /// Load a model from a path to a json model object.
    ///
    /// * `path` - Path to load the model from.
    fn load(path: &str) -> Result<Self, DecisionTreeError> {
        let json_str = match fs::read_to_string(path) {
            Ok(s) => Ok(s),
            Err(e) => Err(DecisionTreeError::UnableToRead(e.to_string())),
        }?;
        Self::from_json(&json_str)
    }

    /// Predict every instance of a list.
    ///
    /// * `instances` - Instances to predict.
    /// * `parallel` - Predict in parallel.
    fn predict_all(&self, instances: &InstanceList, parallel: bool) -> Vec<Option<String>> {
        if parallel {
            instances.instances().par_iter().map(|i| self.predict(i)).collect()
        } else {
            instances.iter().map(|i| self.predict(i)).collect()
        }
    }

    /// Compare the predictions on `test_set` with its ground-truth labels.
    fn test_classifier(&self, test_set: &InstanceList) -> ClassificationPerformance {
        let predictions = self.predict_all(test_set, true);
        let mut confusion_matrix = ConfusionMatrix::new();
        for (instance, predicted) in test_set.iter().zip(predictions.iter()) {
            confusion_matrix.classify(&instance.class_label, predicted.as_deref());
        }
        ClassificationPerformance::new(confusion_matrix)
    }
}
