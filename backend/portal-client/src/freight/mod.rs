//! Display-oriented projections of the freight datasets.

pub mod municipality;

pub use municipality::Municipality;

use crate::decoder::{Cell, TabularResult};
use crate::error::PortalClientError;

use serde::{Deserialize, Serialize};

pub const COLUMN_MONTH_REFERENCE: &str = "mes_referencia";
pub const COLUMN_SOURCE: &str = "fonte";
pub const COLUMN_DISTANCE_KM: &str = "distancia_em_km";
pub const COLUMN_TON_RATE_KM: &str = "vlr_tonelada_km";
pub const COLUMN_TON_RATE: &str = "vlr_tonelada";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightRateRow {
    pub month_reference: String,
    pub source: String,
    pub ton_rate_km: f64,
    pub ton_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightRoute {
    pub origin: String,
    pub destination: String,
    pub year: i32,
    pub distance_km: Option<f64>,
    pub rows: Vec<FreightRateRow>,
}

impl FreightRoute {
    /// Project a freight rate table onto a route.
    ///
    /// An empty table yields a route with no rows.
    ///
    /// # Errors
    ///
    /// Returns [`PortalClientError::Decode`] if a non-empty table lacks one of
    /// the rate columns or holds a non-numeric rate.
    pub fn from_table(
        origin: &str,
        destination: &str,
        year: i32,
        table: &TabularResult,
    ) -> Result<Self, PortalClientError> {
        let mut route = FreightRoute {
            origin: origin.to_string(),
            destination: destination.to_string(),
            year,
            distance_km: None,
            rows: Vec::new(),
        };
        if table.is_empty() {
            return Ok(route);
        }

        let column = |name: &str| {
            table.column_index(name).ok_or_else(|| {
                PortalClientError::decode(format!("freight table lacks column '{name}'"))
            })
        };
        let month = column(COLUMN_MONTH_REFERENCE)?;
        let source = column(COLUMN_SOURCE)?;
        let ton_rate_km = column(COLUMN_TON_RATE_KM)?;
        let ton_rate = column(COLUMN_TON_RATE)?;
        let distance = table.column_index(COLUMN_DISTANCE_KM);

        route.distance_km = distance
            .and_then(|index| table.rows.first()?.get(index))
            .and_then(Cell::to_f64_lenient);

        for (row_number, row) in table.rows.iter().enumerate() {
            let number = |index: usize, name: &str| {
                row[index].to_f64_lenient().ok_or_else(|| {
                    PortalClientError::decode(format!(
                        "freight row {row_number}: '{name}' is not numeric"
                    ))
                })
            };
            route.rows.push(FreightRateRow {
                month_reference: text(&row[month]),
                source: text(&row[source]),
                ton_rate_km: number(ton_rate_km, COLUMN_TON_RATE_KM)?,
                ton_rate: number(ton_rate, COLUMN_TON_RATE)?,
            });
        }

        Ok(route)
    }

    /// Mean of the monthly R$/t·km rates.
    pub fn average_ton_rate_km(&self) -> Option<f64> {
        mean(self.rows.iter().map(|row| row.ton_rate_km))
    }

    /// Mean of the monthly R$/t rates.
    pub fn average_ton_rate(&self) -> Option<f64> {
        mean(self.rows.iter().map(|row| row.ton_rate))
    }

    /// Cost of hauling `tons` over the route at the year's mean per-ton rate.
    pub fn estimate_cost(&self, tons: f64) -> Option<f64> {
        self.average_ton_rate().map(|rate| rate * tons)
    }
}

/// Latest year with freight data, or `fallback` when the portal has none.
pub fn last_year_or(table: &TabularResult, fallback: i32) -> i32 {
    table
        .rows
        .first()
        .and_then(|row| row.first())
        .and_then(|cell| cell.as_i64().or_else(|| cell.to_f64_lenient().map(|v| v as i64)))
        .and_then(|year| i32::try_from(year).ok())
        .unwrap_or(fallback)
}

fn text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Number(number) => number.to_string(),
        Cell::Bool(flag) => flag.to_string(),
        Cell::Null => String::new(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
