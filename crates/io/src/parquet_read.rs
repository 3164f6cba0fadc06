//! Low-level Parquet reading and column extraction.

use std::path::{Path, PathBuf};

use arrow::array::{AsArray, RecordBatch};
use arrow::datatypes::{ArrowPrimitiveType, Float64Type, SchemaRef};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;

/// A fully loaded Parquet file: Arrow schema (with its key-value metadata)
/// and all record batches.
#[derive(Debug)]
pub(crate) struct Table {
    path: PathBuf,
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_table(path: &Path) -> Result<Table, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> = reader.collect::<Result<Vec<_>, _>>()?;

    Ok(Table {
        path: path.to_path_buf(),
        schema,
        batches,
    })
}

impl Table {
    /// Path the table was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up a schema metadata entry.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.schema.metadata().get(key).map(String::as_str)
    }

    /// Returns `true` if the schema has a column called `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.schema.index_of(name).is_ok()
    }

    /// Names of all columns in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Total number of rows across batches.
    pub fn n_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Extracts a primitive column across all batches, nulls as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingColumn`] if the column is absent and
    /// [`IoError::Validation`] if it has a different data type.
    pub fn primitive_column<T: ArrowPrimitiveType>(
        &self,
        name: &str,
    ) -> Result<Vec<Option<T::Native>>, IoError> {
        let idx = self
            .schema
            .index_of(name)
            .map_err(|_| IoError::MissingColumn {
                name: name.to_string(),
                path: self.path.clone(),
            })?;

        let mut out = Vec::with_capacity(self.n_rows());
        for batch in &self.batches {
            let col = batch.column(idx);
            let arr = col.as_primitive_opt::<T>().ok_or_else(|| IoError::Validation {
                count: 1,
                details: format!(
                    "column '{name}' has type {}, expected {}",
                    col.data_type(),
                    T::DATA_TYPE
                ),
            })?;
            out.extend(arr.iter());
        }
        Ok(out)
    }

    /// Extracts a primitive column that must not contain nulls.
    pub fn required_column<T: ArrowPrimitiveType>(
        &self,
        name: &str,
    ) -> Result<Vec<T::Native>, IoError> {
        let values = self.primitive_column::<T>(name)?;
        let n_null = values.iter().filter(|v| v.is_none()).count();
        if n_null > 0 {
            return Err(IoError::Validation {
                count: 1,
                details: format!("column '{name}' has {n_null} null value(s)"),
            });
        }
        Ok(values.into_iter().flatten().collect())
    }

    /// Extracts a float column with nulls mapped to NaN.
    pub fn f64_column(&self, name: &str) -> Result<Vec<f64>, IoError> {
        Ok(self
            .primitive_column::<Float64Type>(name)?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect())
    }
}
