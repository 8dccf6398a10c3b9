use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
  dataset::types::{Dataset, DatasetDescriptor, DatasetFormat, DatasetSource, Variable, VariableValue},
  error::Error,
};

const SNIFF_BYTES: usize = 1024;
const METADATA_DELIMITER: char = ';';

/// Reads comma, semicolon or tab separated datasets from disk.
pub struct DelimitedFileSource {
  descriptor: DatasetDescriptor,
}

impl DelimitedFileSource {
  pub fn new(descriptor: DatasetDescriptor) -> Self {
    DelimitedFileSource { descriptor }
  }

  /// Reads a JSON descriptor. Relative paths inside it are resolved against the descriptor's directory.
  pub async fn from_descriptor_file(path: &Path) -> Result<Self, Error> {
    let content = read_file(path).await?;
    let mut descriptor: DatasetDescriptor = serde_json::from_str(&content)?;
    let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
    descriptor.filename = resolve(&base, &descriptor.filename);
    descriptor.metadata = descriptor.metadata.map(|metadata| resolve(&base, &metadata));
    Ok(DelimitedFileSource::new(descriptor))
  }

  /// Opens either a JSON descriptor or a delimited data file directly.
  pub async fn open(path: &Path) -> Result<Self, Error> {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some("json") => Self::from_descriptor_file(path).await,
      _ => Ok(DelimitedFileSource::new(DatasetDescriptor::new(path))),
    }
  }

  pub fn descriptor(&self) -> &DatasetDescriptor {
    &self.descriptor
  }

  async fn load_metadata(&self, header: Option<&[String]>) -> Result<Vec<(String, String)>, Error> {
    if let Some(path) = &self.descriptor.metadata {
      info!("Loading metadata from {}", path.display());
      let content = read_file(path).await?;
      return Ok(parse_metadata(&content));
    }
    match header {
      Some(header) => {
        info!("No metadata, reconstructing from header");
        Ok(header.iter().map(|h| (h.clone(), h.clone())).collect())
      },
      None => Ok(Vec::new()),
    }
  }
}

#[async_trait]
impl DatasetSource for DelimitedFileSource {
  async fn load(&self) -> Result<Dataset, Error> {
    let name = self.descriptor.dataset_name();
    info!("Loading dataset '{}' from {}", name, self.descriptor.filename.display());
    let content = read_file(&self.descriptor.filename).await?;

    let format = match &self.descriptor.format {
      Some(mime) => DatasetFormat::from_mime(mime)?,
      None => sniff_format(&content),
    };
    let delimiter = match format {
      DatasetFormat::Csv => csv_delimiter(content.lines().next().unwrap_or_default()),
      DatasetFormat::Tab => format.delimiter(),
    };
    let mut rows = parse_records(&content, delimiter).into_iter();

    let (header, metadata) = if self.descriptor.header {
      let header = rows.next().ok_or_else(|| Error::EmptyDataset(name.clone()))?;
      let metadata = self.load_metadata(Some(header.as_slice())).await?;
      (header, metadata)
    } else {
      let metadata = self.load_metadata(None).await?;
      if metadata.is_empty() {
        return Err(Error::MissingHeader(name));
      }
      (metadata.iter().map(|(key, _)| key.clone()).collect(), metadata)
    };

    if !validate_header(&header, &metadata) {
      warn!("Header and metadata of '{}' do not correspond", name);
    }

    let rows: Vec<Vec<String>> = rows.collect();
    let variables = header
      .iter()
      .enumerate()
      .map(|(column, label)| Variable::new(label.clone(), &name, value_counts(&rows, column)))
      .collect();

    Ok(Dataset { name, variables, metadata })
  }
}

async fn read_file(path: &Path) -> Result<String, Error> {
  tokio::fs::read_to_string(path).await.map_err(|e| Error::io(path.display().to_string(), e))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
  if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}

/// Guesses the format from the first bytes of the file, defaulting to CSV.
pub fn sniff_format(content: &str) -> DatasetFormat {
  let mut end = content.len().min(SNIFF_BYTES);
  while !content.is_char_boundary(end) {
    end -= 1;
  }
  let sample = content[..end].lines().next().unwrap_or_default();
  let tabs = sample.matches('\t').count();
  let separators = sample.matches([',', ';']).count();
  if tabs > separators { DatasetFormat::Tab } else { DatasetFormat::Csv }
}

fn csv_delimiter(first_line: &str) -> char {
  if first_line.matches(';').count() > first_line.matches(',').count() { ';' } else { ',' }
}

/// Splits delimited text into records of fields.
///
/// Quoted fields may hold the delimiter, line breaks and doubled quotes. Unquoted
/// fields are trimmed. Blank lines produce no record.
fn parse_records(content: &str, delimiter: char) -> Vec<Vec<String>> {
  let mut records = Vec::new();
  let mut record: Vec<String> = Vec::new();
  let mut field = String::new();
  let mut quoted = false;
  let mut in_quotes = false;
  let mut chars = content.chars().peekable();

  while let Some(c) = chars.next() {
    if in_quotes {
      match c {
        '"' if chars.peek() == Some(&'"') => {
          chars.next();
          field.push('"');
        },
        '"' => in_quotes = false,
        _ => field.push(c),
      }
      continue;
    }
    match c {
      '"' if !quoted && field.trim().is_empty() => {
        field.clear();
        quoted = true;
        in_quotes = true;
      },
      '\r' if chars.peek() == Some(&'\n') => {},
      '\n' => {
        record.push(finish_field(&mut field, quoted));
        quoted = false;
        let blank = record.len() == 1 && record[0].is_empty();
        let finished = std::mem::take(&mut record);
        if !blank {
          records.push(finished);
        }
      },
      _ if c == delimiter => {
        record.push(finish_field(&mut field, quoted));
        quoted = false;
      },
      // Padding between a closing quote and the next delimiter.
      _ if quoted && c.is_whitespace() => {},
      _ => field.push(c),
    }
  }
  if quoted || !field.trim().is_empty() || !record.is_empty() {
    record.push(finish_field(&mut field, quoted));
    records.push(record);
  }
  records
}

fn finish_field(field: &mut String, quoted: bool) -> String {
  let value = std::mem::take(field);
  if quoted { value } else { value.trim().to_string() }
}

fn parse_metadata(content: &str) -> Vec<(String, String)> {
  parse_records(content, METADATA_DELIMITER)
    .into_iter()
    .filter_map(|fields| match fields.as_slice() {
      [key, value, ..] => Some((key.trim().to_string(), value.trim().to_string())),
      _ => None,
    })
    .collect()
}

/// True when every header column has a metadata entry.
pub fn validate_header(header: &[String], metadata: &[(String, String)]) -> bool {
  if header.is_empty() || metadata.is_empty() {
    return false;
  }
  header.iter().all(|column| metadata.iter().any(|(key, _)| key == column))
}

fn value_counts(rows: &[Vec<String>], column: usize) -> Vec<VariableValue> {
  let mut counts: HashMap<&str, usize> = HashMap::new();
  for value in rows.iter().filter_map(|row| row.get(column)).filter(|value| !value.is_empty()) {
    *counts.entry(value.as_str()).or_default() += 1;
  }
  let mut values: Vec<VariableValue> = counts.into_iter().map(|(label, count)| VariableValue::new(label, count)).collect();
  values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
  values
}
