use crate::decoder::TabularResult;

use serde::{Deserialize, Serialize};

/// Freight origin/destination as listed by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// Full OLAP member, e.g. `[Municipio Destino.New Hierarchy 0].[RIO DE JANEIRO-RJ]`.
    pub member: String,
    /// Display name, e.g. `RIO DE JANEIRO-RJ`; this is what the rate queries take.
    pub name: String,
}

impl Municipality {
    /// Read `(member, name)` pairs from the first two columns. Rows without
    /// two text cells are skipped.
    pub fn list_from(table: &TabularResult) -> Vec<Municipality> {
        table
            .rows
            .iter()
            .filter_map(|row| {
                let member = row.first()?.as_str()?;
                let name = row.get(1)?.as_str()?;
                Some(Municipality {
                    member: member.to_string(),
                    name: name.to_string(),
                })
            })
            .collect()
    }
}
