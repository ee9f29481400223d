//! Turns CDA JSON bodies into [`TabularResult`]s.
//!
//! Missing `metadata`/`resultset` is a normal "no data" answer from this
//! portal and decodes to an empty result. A body that is not JSON at all is
//! a [`PortalClientError::Decode`].

pub mod tabular;

pub use tabular::{Cell, Column, TabularResult};

use crate::error::PortalClientError;

use std::collections::HashSet;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// Per-dataset post-processing of the de-duplicated column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// Keep the first occurrence of each column name.
    FirstSeen,
    /// As `FirstSeen`, then drop the last kept column. The price table
    /// export repeats a trailing column that is not part of the data.
    DropTrailingColumn,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    #[serde(rename = "colName")]
    col_name: String,
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    metadata: Option<Vec<RawColumn>>,
    resultset: Option<Vec<Vec<Cell>>>,
}

/// Raw indices to keep, in metadata order.
pub fn projection_indices<'a, I>(column_names: I, rule: ColumnRule) -> Vec<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut kept: Vec<usize> = column_names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| seen.insert(*name))
        .map(|(index, _)| index)
        .collect();

    if rule == ColumnRule::DropTrailingColumn {
        kept.pop();
    }
    kept
}

/// Decode a CDA response body.
///
/// # Errors
///
/// Returns [`PortalClientError::Decode`] if the body is not JSON, if a
/// `metadata` entry lacks `colName`, if a cell is not a scalar, or if a row's
/// length differs from the metadata length.
pub fn decode(body: &[u8], rule: ColumnRule) -> Result<TabularResult, PortalClientError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        PortalClientError::decode(format!("query response is not JSON: {e}"))
    })?;

    if !value.is_object() {
        debug!("CDA response is not an object, treating as no data");
        return Ok(TabularResult::empty());
    }

    let payload: RawPayload = serde_json::from_value(value)
        .map_err(|e| PortalClientError::decode(format!("unexpected CDA shape: {e}")))?;

    let (Some(metadata), Some(resultset)) = (payload.metadata, payload.resultset) else {
        debug!("CDA response without metadata/resultset, treating as no data");
        return Ok(TabularResult::empty());
    };

    let kept = projection_indices(metadata.iter().map(|c| c.col_name.as_str()), rule);

    let mut rows = Vec::with_capacity(resultset.len());
    for (row_number, row) in resultset.into_iter().enumerate() {
        if row.len() != metadata.len() {
            return Err(PortalClientError::decode(format!(
                "row {row_number} has {} cells, metadata declares {}",
                row.len(),
                metadata.len()
            )));
        }
        rows.push(kept.iter().map(|&index| row[index].clone()).collect());
    }

    let columns = kept
        .iter()
        .map(|&index| Column {
            name: metadata[index].col_name.clone(),
            index,
        })
        .collect();

    Ok(TabularResult { columns, rows })
}
