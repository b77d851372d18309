use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const ARTIFACT: &str = "label binarizer";

/// On-disk shape of the label decoder: class names in column order.
///
/// ```json
/// { "classes": ["Action", "Comedy", "Drama"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelSpec {
    pub classes: Vec<String>,
}

/// Ordered, closed set of label names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBinarizer {
    classes: Vec<String>,
}

impl LabelBinarizer {
    pub fn from_spec(spec: LabelSpec) -> Result<Self, ModelError> {
        Self::new(spec.classes)
    }

    /// Rejects an empty class list, blank names and duplicates.
    pub fn new<I, S>(classes: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        if classes.is_empty() {
            return Err(ModelError::invalid(ARTIFACT, "no classes"));
        }

        let mut seen = FxHashSet::default();
        for class in &classes {
            if class.trim().is_empty() {
                return Err(ModelError::invalid(ARTIFACT, "blank class name"));
            }
            if !seen.insert(class.as_str()) {
                return Err(ModelError::invalid(
                    ARTIFACT,
                    format!("duplicate class {class:?}"),
                ));
            }
        }

        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == label)
    }

    /// Names whose indicator is set, in class order.
    pub fn inverse_transform(&self, indicators: &[bool]) -> Result<Vec<String>, ModelError> {
        if indicators.len() != self.classes.len() {
            return Err(ModelError::DimensionMismatch {
                what: "label indicators",
                expected: self.classes.len(),
                actual: indicators.len(),
            });
        }

        Ok(self
            .classes
            .iter()
            .zip(indicators)
            .filter(|(_, &on)| on)
            .map(|(class, _)| class.clone())
            .collect())
    }
}
