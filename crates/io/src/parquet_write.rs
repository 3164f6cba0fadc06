//! Low-level Parquet column building.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, RecordBatch, UInt8Array, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use psm_chron::{ForwardProxySeries, KiloyearEnsemble};
use psm_season::SimEnsemble;

use crate::error::IoError;

/// Schema metadata key for the variable name.
pub(crate) const META_NAME: &str = "name";
/// Schema metadata key for the units label.
pub(crate) const META_UNITS: &str = "units";
/// Schema metadata key for the site name.
pub(crate) const META_SITE: &str = "site";
/// Schema metadata key for the longitude.
pub(crate) const META_LON: &str = "lon";
/// Schema metadata key for the latitude.
pub(crate) const META_LAT: &str = "lat";
/// Schema metadata key for the depth unit.
pub(crate) const META_DEPTH_UNIT: &str = "depth_unit";

fn nan_to_null(values: impl IntoIterator<Item = f64>) -> Float64Array {
    values
        .into_iter()
        .map(|v| (!v.is_nan()).then_some(v))
        .collect()
}

/// Builds the Arrow schema for a simulated ensemble.
///
/// Columns: `member`, `year`, `month`, `day`, `value` (nullable).
pub(crate) fn simulation_schema(ensemble: &SimEnsemble) -> SchemaRef {
    let mut metadata = HashMap::from([(META_NAME.to_string(), ensemble.name().to_string())]);
    if let Some(units) = ensemble.units() {
        metadata.insert(META_UNITS.to_string(), units.to_string());
    }
    Arc::new(
        Schema::new(vec![
            Field::new("member", DataType::UInt32, false),
            Field::new("year", DataType::Int32, false),
            Field::new("month", DataType::UInt8, false),
            Field::new("day", DataType::UInt8, false),
            Field::new("value", DataType::Float64, true),
        ])
        .with_metadata(metadata),
    )
}

/// Converts one member of a simulated ensemble into a [`RecordBatch`].
pub(crate) fn simulation_batch(
    ensemble: &SimEnsemble,
    member: usize,
    schema: &SchemaRef,
) -> Result<RecordBatch, IoError> {
    let dates = ensemble.dates();
    let n = dates.len();
    let member_id = u32::try_from(member).map_err(|_| IoError::Validation {
        count: 1,
        details: format!("member index {member} does not fit into u32"),
    })?;

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt32Array::from(vec![member_id; n])),
        Arc::new(Int32Array::from_iter_values(dates.iter().map(|d| d.year()))),
        Arc::new(UInt8Array::from_iter_values(dates.iter().map(|d| d.month()))),
        Arc::new(UInt8Array::from_iter_values(dates.iter().map(|d| d.day()))),
        Arc::new(nan_to_null(ensemble.member(member).iter().copied())),
    ];
    Ok(RecordBatch::try_new(schema.clone(), columns)?)
}

/// Builds the Arrow schema for a kiloyear chronology table.
///
/// Columns: `depth` followed by one nullable age column per member.
pub(crate) fn chronology_schema(chron: &KiloyearEnsemble) -> SchemaRef {
    let mut fields = vec![Field::new("depth", DataType::Float64, false)];
    fields.extend(
        (0..chron.n_members()).map(|m| Field::new(format!("member_{m}"), DataType::Float64, true)),
    );
    Arc::new(Schema::new(fields).with_metadata(HashMap::from([(
        META_DEPTH_UNIT.to_string(),
        chron.depth_unit().to_string(),
    )])))
}

/// Converts a kiloyear chronology into a single wide [`RecordBatch`].
pub(crate) fn chronology_batch(
    chron: &KiloyearEnsemble,
    schema: &SchemaRef,
) -> Result<RecordBatch, IoError> {
    let mut columns: Vec<ArrayRef> = vec![Arc::new(Float64Array::from(chron.depths().to_vec()))];
    for age in chron.ages_ka().columns() {
        columns.push(Arc::new(nan_to_null(age.iter().copied())));
    }
    Ok(RecordBatch::try_new(schema.clone(), columns)?)
}

/// Builds the Arrow schema for a forward proxy series.
///
/// Columns: `depth`, `member`, `value` (nullable).
pub(crate) fn forward_proxy_schema(series: &ForwardProxySeries) -> SchemaRef {
    let mut metadata = HashMap::from([
        (META_NAME.to_string(), series.name().to_string()),
        (META_SITE.to_string(), series.site().to_string()),
        (META_LON.to_string(), series.lon().to_string()),
        (META_LAT.to_string(), series.lat().to_string()),
        (META_DEPTH_UNIT.to_string(), series.depth_unit().to_string()),
    ]);
    if let Some(units) = series.units() {
        metadata.insert(META_UNITS.to_string(), units.to_string());
    }
    Arc::new(
        Schema::new(vec![
            Field::new("depth", DataType::Float64, false),
            Field::new("member", DataType::UInt32, false),
            Field::new("value", DataType::Float64, true),
        ])
        .with_metadata(metadata),
    )
}

/// Converts one chronology member of a forward proxy into a [`RecordBatch`].
pub(crate) fn forward_proxy_batch(
    series: &ForwardProxySeries,
    member: usize,
    schema: &SchemaRef,
) -> Result<RecordBatch, IoError> {
    let n = series.n_depths();
    let member_id = u32::try_from(member).map_err(|_| IoError::Validation {
        count: 1,
        details: format!("member index {member} does not fit into u32"),
    })?;

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(series.depths().to_vec())),
        Arc::new(UInt32Array::from(vec![member_id; n])),
        Arc::new(nan_to_null(series.member(member).iter().copied())),
    ];
    Ok(RecordBatch::try_new(schema.clone(), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: SchemaRef,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}
