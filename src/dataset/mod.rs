pub mod delimited;
#[cfg(test)]
pub mod mock_dataset_source;
pub mod types;

pub use delimited::DelimitedFileSource;
pub use types::{Dataset, DatasetDescriptor, DatasetFormat, DatasetSource, Variable, VariableValue};
