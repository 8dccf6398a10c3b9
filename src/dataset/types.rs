use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Describes where a dataset lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
  pub filename: PathBuf,
  #[serde(default)]
  pub format: Option<String>,
  #[serde(default = "default_header")]
  pub header: bool,
  #[serde(default)]
  pub metadata: Option<PathBuf>,
}

fn default_header() -> bool {
  true
}

impl DatasetDescriptor {
  pub fn new(filename: impl Into<PathBuf>) -> Self {
    DatasetDescriptor { filename: filename.into(), format: None, header: true, metadata: None }
  }

  /// The file stem of the dataset file, used as the dataset name.
  pub fn dataset_name(&self) -> String {
    self.filename.file_stem().map(|stem| stem.to_string_lossy().to_string()).unwrap_or_default()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetFormat {
  Csv,
  Tab,
}

impl DatasetFormat {
  pub fn from_mime(mime: &str) -> Result<Self, Error> {
    match mime {
      "text/csv" => Ok(DatasetFormat::Csv),
      "text/tab-separated-values" | "text/plain" => Ok(DatasetFormat::Tab),
      other => Err(Error::UnsupportedFormat(other.to_string())),
    }
  }

  pub fn delimiter(&self) -> char {
    match self {
      DatasetFormat::Csv => ',',
      DatasetFormat::Tab => '\t',
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableValue {
  pub label: String,
  pub count: usize,
}

impl VariableValue {
  pub fn new(label: impl Into<String>, count: usize) -> Self {
    VariableValue { label: label.into(), count }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
  pub label: String,
  pub description: String,
  pub values: Vec<VariableValue>,
}

impl Variable {
  pub fn new(label: impl Into<String>, dataset_name: &str, values: Vec<VariableValue>) -> Self {
    let label = label.into();
    let description = format!("The variable '{}' as taken from the '{}' dataset.", label, dataset_name);
    Variable { label, description, values }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
  pub name: String,
  pub variables: Vec<Variable>,
  /// Ordered `column -> description` pairs.
  pub metadata: Vec<(String, String)>,
}

impl Dataset {
  /// Variable labels in column order, the options offered in the sidebar.
  pub fn variable_labels(&self) -> Vec<String> {
    self.variables.iter().map(|v| v.label.clone()).collect()
  }

  pub fn variable(&self, label: &str) -> Option<&Variable> {
    self.variables.iter().find(|v| v.label == label)
  }

  pub fn metadata_for(&self, label: &str) -> Option<&str> {
    self.metadata.iter().find(|(key, _)| key == label).map(|(_, value)| value.as_str())
  }
}

#[async_trait]
pub trait DatasetSource: Send + Sync {
  async fn load(&self) -> Result<Dataset, Error>;
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_descriptor_defaults() {
    let descriptor: DatasetDescriptor = serde_json::from_str(r#"{ "filename": "data/canada.csv" }"#).unwrap();

    assert_eq!(descriptor, DatasetDescriptor::new("data/canada.csv"));
    assert_eq!(descriptor.dataset_name(), "canada");
  }

  #[test]
  fn test_format_from_mime() {
    assert_eq!(DatasetFormat::from_mime("text/csv").unwrap(), DatasetFormat::Csv);
    assert_eq!(DatasetFormat::from_mime("text/plain").unwrap(), DatasetFormat::Tab);
    assert!(matches!(DatasetFormat::from_mime("application/x-spss"), Err(Error::UnsupportedFormat(_))));
  }

  #[test]
  fn test_variable_description() {
    let variable = Variable::new("age", "census", vec![]);
    assert_eq!(variable.description, "The variable 'age' as taken from the 'census' dataset.");
  }

  #[test]
  fn test_dataset_lookup() {
    let dataset = Dataset {
      name: "census".to_string(),
      variables: vec![Variable::new("age", "census", vec![]), Variable::new("sex", "census", vec![])],
      metadata: vec![("age".to_string(), "Age in years".to_string())],
    };

    assert_eq!(dataset.variable_labels(), vec!["age".to_string(), "sex".to_string()]);
    assert!(dataset.variable("sex").is_some());
    assert!(dataset.variable("income").is_none());
    assert_eq!(dataset.metadata_for("age"), Some("Age in years"));
  }
}
