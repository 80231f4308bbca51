// CSV dataset loader
//
// Reads (input text, label) pairs from a headed CSV file. Rows that do not
// fit the header or have a blank cell are dropped; anything that prevents
// reading the table as a whole is a LoadError.

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::DatasetConfig;
use crate::errors::LoadError;

/// One labeled example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub input: String,
    pub label: String,
}

impl TrainingRecord {
    pub fn new(input: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            label: label.into(),
        }
    }
}

/// Records read from one file
#[derive(Debug, Clone)]
pub struct Dataset {
    pub path: PathBuf,
    pub records: Vec<TrainingRecord>,
    /// Rows dropped as malformed
    pub skipped: usize,
}

impl Dataset {
    /// Load the file described by `config`
    pub fn load(config: &DatasetConfig) -> Result<Self, LoadError> {
        let path = config.path.as_path();
        if !path.is_file() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = std::fs::File::open(path).map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;

        Self::from_reader(file, path, &config.input_column, &config.label_column)
    }

    /// Parse CSV from any reader. `path` is only used for error messages.
    pub fn from_reader<R: Read>(
        reader: R,
        path: &Path,
        input_column: &str,
        label_column: &str,
    ) -> Result<Self, LoadError> {
        let csv_error = |source: csv::Error| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let input_idx = column_index(&headers, input_column).ok_or_else(|| {
            LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: input_column.to_string(),
            }
        })?;
        let label_idx = column_index(&headers, label_column).ok_or_else(|| {
            LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: label_column.to_string(),
            }
        })?;

        let mut records = Vec::new();
        let mut skipped = 0;

        for (row, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(csv_error(e)),
                Err(e) => {
                    tracing::debug!("Skipping unparsable row {} in {}: {}", row + 2, path.display(), e);
                    skipped += 1;
                    continue;
                }
            };

            if record.len() != headers.len() {
                tracing::debug!(
                    "Skipping row {} in {}: expected {} fields, saw {}",
                    row + 2,
                    path.display(),
                    headers.len(),
                    record.len()
                );
                skipped += 1;
                continue;
            }

            let input = record.get(input_idx).unwrap_or_default();
            let label = record.get(label_idx).unwrap_or_default();
            if input.trim().is_empty() || label.trim().is_empty() {
                skipped += 1;
                continue;
            }

            records.push(TrainingRecord::new(input, label));
        }

        if records.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed rows in {}", skipped, path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
            skipped,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
