use async_trait::async_trait;

use super::{Dataset, DatasetSource, Variable, VariableValue};
use crate::error::Error;

#[derive(Clone, Debug)]
pub struct MockDatasetSource {
  pub fail: bool,
}

impl MockDatasetSource {
  pub fn dataset() -> Dataset {
    let name = "census";
    Dataset {
      name: name.to_string(),
      variables: vec![
        Variable::new("age", name, vec![VariableValue::new("30", 2), VariableValue::new("41", 1)]),
        Variable::new("occupation", name, vec![VariableValue::new("baker", 3)]),
      ],
      metadata: vec![
        ("age".to_string(), "Age in years".to_string()),
        ("occupation".to_string(), "HISCO occupation".to_string()),
      ],
    }
  }
}

#[async_trait]
impl DatasetSource for MockDatasetSource {
  async fn load(&self) -> Result<Dataset, Error> {
    match self.fail {
      true => Err(Error::EmptyDataset("census".to_string())),
      false => Ok(MockDatasetSource::dataset()),
    }
  }
}
