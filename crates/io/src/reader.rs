//! High-level Parquet readers producing the in-memory data model.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::datatypes::{Int32Type, UInt8Type, UInt32Type};
use ndarray::Array2;
use psm_calendar::SimDate;
use psm_chron::{Coordinates, DepthUnit, ForwardProxySeries, KiloyearEnsemble};
use psm_season::SimEnsemble;
use tracing::{debug, info, warn};

use crate::error::IoError;
use crate::parquet_read::{self, Table};
use crate::parquet_write::{META_DEPTH_UNIT, META_LAT, META_LON, META_NAME, META_SITE, META_UNITS};

fn no_rows(table: &Table) -> IoError {
    IoError::Validation {
        count: 1,
        details: format!("{} has no rows", table.path().display()),
    }
}

/// Optional `member` column; all zero when absent.
fn member_ids(table: &Table) -> Result<Vec<u32>, IoError> {
    if table.has_column("member") {
        table.required_column::<UInt32Type>("member")
    } else {
        Ok(vec![0; table.n_rows()])
    }
}

fn depth_unit(table: &Table) -> Result<DepthUnit, IoError> {
    match table.metadata(META_DEPTH_UNIT) {
        Some(unit) => Ok(unit.parse::<DepthUnit>()?),
        None => {
            warn!(
                path = %table.path().display(),
                "no depth_unit metadata, assuming metres"
            );
            Ok(DepthUnit::Meters)
        }
    }
}

fn float_metadata(table: &Table, key: &str) -> Result<f64, IoError> {
    let raw = table.metadata(key).ok_or_else(|| IoError::Validation {
        count: 1,
        details: format!("missing '{key}' metadata"),
    })?;
    raw.parse().map_err(|_| IoError::Validation {
        count: 1,
        details: format!("'{key}' metadata is not a number: {raw:?}"),
    })
}

/// Reads a simulated series or ensemble.
///
/// Expects columns `year` (i32), `month` (u8), `day` (u8) and `value`
/// (f64, nulls read as NaN), plus an optional `member` (u32). Rows are
/// grouped by member; every member must carry the same dates in the same
/// order. The variable name and units come from the `name` and `units`
/// schema metadata, the name falling back to the file stem.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingColumn`],
/// [`IoError::Validation`] for empty tables or inconsistent members, and
/// [`IoError::Calendar`] for invalid dates.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_simulation(path: &Path) -> Result<SimEnsemble, IoError> {
    let table = parquet_read::read_table(path)?;
    if table.n_rows() == 0 {
        return Err(no_rows(&table));
    }

    let members = member_ids(&table)?;
    let years = table.required_column::<Int32Type>("year")?;
    let months = table.required_column::<UInt8Type>("month")?;
    let days = table.required_column::<UInt8Type>("day")?;
    let values = table.f64_column("value")?;

    let mut groups: BTreeMap<u32, (Vec<SimDate>, Vec<f64>)> = BTreeMap::new();
    for i in 0..table.n_rows() {
        let date = SimDate::new(years[i], months[i], days[i])?;
        let entry = groups.entry(members[i]).or_default();
        entry.0.push(date);
        entry.1.push(values[i]);
    }

    let mut groups = groups.into_iter();
    let Some((_, (dates, first))) = groups.next() else {
        return Err(no_rows(&table));
    };
    let mut rows = vec![first];
    for (member, (member_dates, member_values)) in groups {
        if member_dates != dates {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "member {member} has a different time axis than the first member"
                ),
            });
        }
        rows.push(member_values);
    }

    let values = Array2::from_shape_fn((rows.len(), dates.len()), |(m, t)| rows[m][t]);
    let name = table
        .metadata(META_NAME)
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "value".to_string());
    let mut ensemble = SimEnsemble::new(name, dates, values)?;
    if let Some(units) = table.metadata(META_UNITS) {
        ensemble = ensemble.with_units(units);
    }

    info!(
        n_members = ensemble.n_members(),
        n_times = ensemble.n_times(),
        "read simulation"
    );
    Ok(ensemble)
}

/// Reads a chronology ensemble with ages in kiloyears.
///
/// Expects a `depth` column (f64) and one nullable f64 age column per
/// ensemble member, in any order after `depth`. The depth unit comes from
/// the `depth_unit` schema metadata and defaults to metres.
///
/// # Errors
///
/// Returns [`IoError::MissingColumn`] without `depth`,
/// [`IoError::Validation`] without age columns or rows, and
/// [`IoError::Model`] for NaN depths or an unknown depth unit.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_chronology(path: &Path) -> Result<KiloyearEnsemble, IoError> {
    let table = parquet_read::read_table(path)?;
    if table.n_rows() == 0 {
        return Err(no_rows(&table));
    }

    let depths = table.f64_column("depth")?;
    let member_names: Vec<&str> = table
        .column_names()
        .into_iter()
        .filter(|&c| c != "depth")
        .collect();
    if member_names.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "chronology table has no age columns".to_string(),
        });
    }
    let columns = member_names
        .iter()
        .map(|c| table.f64_column(c))
        .collect::<Result<Vec<_>, _>>()?;

    let ages = Array2::from_shape_fn((depths.len(), columns.len()), |(d, m)| columns[m][d]);
    let chron = KiloyearEnsemble::new(depths, depth_unit(&table)?, ages)?;
    debug!(
        n_depths = chron.n_depths(),
        n_members = chron.n_members(),
        "read chronology"
    );
    Ok(chron)
}

/// Reads a forward proxy series written by
/// [`write_forward_proxy`](crate::write_forward_proxy).
///
/// # Errors
///
/// Returns [`IoError::Validation`] when metadata is missing or malformed or
/// when members disagree on the depth axis.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_forward_proxy(path: &Path) -> Result<ForwardProxySeries, IoError> {
    let table = parquet_read::read_table(path)?;
    if table.n_rows() == 0 {
        return Err(no_rows(&table));
    }

    let depths = table.f64_column("depth")?;
    let members = table.required_column::<UInt32Type>("member")?;
    let values = table.f64_column("value")?;

    let mut groups: BTreeMap<u32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for i in 0..table.n_rows() {
        let entry = groups.entry(members[i]).or_default();
        entry.0.push(depths[i]);
        entry.1.push(values[i]);
    }

    let mut groups = groups.into_iter();
    let Some((_, (axis, first))) = groups.next() else {
        return Err(no_rows(&table));
    };
    let mut cols = vec![first];
    for (member, (member_depths, member_values)) in groups {
        if member_depths != axis {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "member {member} has a different depth axis than the first member"
                ),
            });
        }
        cols.push(member_values);
    }

    let values = Array2::from_shape_fn((axis.len(), cols.len()), |(d, m)| cols[m][d]);
    let coordinates = Coordinates::new(
        float_metadata(&table, META_LON)?,
        float_metadata(&table, META_LAT)?,
    );
    let mut series = ForwardProxySeries::new(
        table.metadata(META_NAME).unwrap_or("value"),
        table.metadata(META_SITE).unwrap_or("unknown"),
        coordinates,
        axis,
        depth_unit(&table)?,
        values,
    )?;
    if let Some(units) = table.metadata(META_UNITS) {
        series = series.with_units(units);
    }
    Ok(series)
}
