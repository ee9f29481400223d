// Unit tests for the CDA result decoder
// Tests de-duplication, projection, and the empty-vs-error boundary

use crate::decoder::{Cell, ColumnRule, TabularResult, decode, projection_indices};
use crate::error::PortalClientError;

use serde_json::json;

fn body(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

/// **VALUE**: Verifies the canonical duplicate-column scenario.
///
/// **WHY THIS MATTERS**: The portal's export repeats columns. The UI must show
/// each column once with the value from its first occurrence.
///
/// **BUG THIS CATCHES**: Would catch keeping the last occurrence instead of the
/// first, or projecting rows onto the wrong indices.
#[test]
fn given_duplicated_uf_column_when_decoded_then_keeps_first_occurrence() {
    // GIVEN: metadata UF, UF, Price and one row
    let raw = body(json!({
        "metadata": [{"colName": "UF"}, {"colName": "UF"}, {"colName": "Price"}],
        "resultset": [["SP", "SP", 12.5]]
    }));

    // WHEN: Decoding with the default rule
    let result = decode(&raw, ColumnRule::FirstSeen).unwrap();

    // THEN: Columns and row are de-duplicated
    assert_eq!(result.column_names(), vec!["UF", "Price"]);
    assert_eq!(result.rows, vec![vec![Cell::from("SP"), Cell::from(12.5)]]);
    assert_eq!(result.columns[1].index, 2, "Should remember the raw index");
}

/// **VALUE**: Verifies decoding without duplicates is the identity projection.
///
/// **WHY THIS MATTERS**: Most datasets have no duplicate columns; de-duplication
/// must not drop anything from them.
///
/// **BUG THIS CATCHES**: Would catch an unconditional trailing-column drop.
#[test]
fn given_unique_columns_when_decoded_then_nothing_is_dropped() {
    // GIVEN: Three distinct columns, two rows
    let raw = body(json!({
        "metadata": [{"colName": "a"}, {"colName": "b"}, {"colName": "c"}],
        "resultset": [[1, "x", null], [2, "y", true]]
    }));

    // WHEN: Decoding
    let result = decode(&raw, ColumnRule::FirstSeen).unwrap();

    // THEN: Same columns, same rows, same order
    assert_eq!(result.column_names(), vec!["a", "b", "c"]);
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.rows[0], vec![Cell::from(1i64), Cell::from("x"), Cell::Null]);
    assert_eq!(result.rows[1][2], Cell::Bool(true));
}

/// **VALUE**: Verifies the price-table rule drops the last de-duplicated column.
///
/// **WHY THIS MATTERS**: The price table export carries a trailing column that
/// is not part of the table. Only that dataset may drop it.
///
/// **BUG THIS CATCHES**: Would catch the rule dropping the raw last index
/// instead of the last kept index.
#[test]
fn given_drop_trailing_rule_when_decoded_then_last_kept_column_is_removed() {
    // GIVEN: A price table with a duplicate and a trailing helper column
    let raw = body(json!({
        "metadata": [
            {"colName": "Regionalizacao.Regionalizacao", "colType": "String", "colIndex": 0},
            {"colName": "UltimoPrecoMedio", "colType": "Numeric", "colIndex": 1},
            {"colName": "Regionalizacao.Regionalizacao", "colType": "String", "colIndex": 2},
            {"colName": "Ordem", "colType": "Numeric", "colIndex": 3}
        ],
        "resultset": [["PR", 120.3, "PR", 1], ["SP", 118.0, "SP", 2]]
    }));

    // WHEN: Decoding with DropTrailingColumn
    let result = decode(&raw, ColumnRule::DropTrailingColumn).unwrap();

    // THEN: Duplicate and trailing column are gone; row order is preserved
    assert_eq!(
        result.column_names(),
        vec!["Regionalizacao.Regionalizacao", "UltimoPrecoMedio"]
    );
    assert_eq!(result.rows[0][0], Cell::from("PR"));
    assert_eq!(result.rows[1][0], Cell::from("SP"));
    assert!(result.rows.iter().all(|row| row.len() == 2));
}

/// **VALUE**: Verifies "no data" answers decode to an explicit empty result.
///
/// **WHY THIS MATTERS**: The portal answers out-of-range queries without
/// metadata/resultset. That is a displayable state, not a failure.
///
/// **BUG THIS CATCHES**: Would catch treating a missing key as a decode error.
#[test]
fn given_missing_resultset_when_decoded_then_returns_empty_result() {
    let missing_resultset = body(json!({"metadata": [{"colName": "UF"}]}));
    let missing_both = body(json!({"queryInfo": {"totalRows": "0"}}));
    let not_an_object = body(json!([]));

    for raw in [missing_resultset, missing_both, not_an_object] {
        let result = decode(&raw, ColumnRule::FirstSeen).unwrap();
        assert_eq!(result, TabularResult::empty());
        assert!(result.columns.is_empty());
    }
}

/// **VALUE**: Verifies a non-JSON body is a DecodeError, not empty data.
///
/// **WHY THIS MATTERS**: The portal answers bad requests with HTML error pages
/// and status 200. Silently returning "no data" would hide the failure.
///
/// **BUG THIS CATCHES**: Would catch a decoder that swallows parse errors.
#[test]
fn given_html_body_when_decoded_then_returns_decode_error() {
    let raw = b"<html><body>Error</body></html>";

    let result = decode(raw, ColumnRule::FirstSeen);

    assert!(matches!(result, Err(PortalClientError::Decode { .. })));
}

/// **VALUE**: Verifies unknown metadata fields are tolerated.
///
/// **WHY THIS MATTERS**: The upstream schema is semi-stable; extra fields must
/// not break decoding.
///
/// **BUG THIS CATCHES**: Would catch `deny_unknown_fields` creeping in.
#[test]
fn given_extra_metadata_fields_when_decoded_then_they_are_ignored() {
    let raw = body(json!({
        "metadata": [{"colName": "ano", "colType": "Integer", "colIndex": 0, "extra": {"x": 1}}],
        "resultset": [[2024]],
        "queryInfo": {"totalRows": "1"}
    }));

    let result = decode(&raw, ColumnRule::FirstSeen).unwrap();

    assert_eq!(result.rows[0][0].as_i64(), Some(2024));
}

/// **VALUE**: Verifies rows whose length disagrees with metadata are rejected.
///
/// **WHY THIS MATTERS**: Projection indexes rows by metadata position. A short
/// row would otherwise panic or shift values into the wrong column.
///
/// **BUG THIS CATCHES**: Would catch a missing length check before projection.
#[test]
fn given_short_row_when_decoded_then_returns_decode_error() {
    let raw = body(json!({
        "metadata": [{"colName": "a"}, {"colName": "b"}],
        "resultset": [["only-one"]]
    }));

    let result = decode(&raw, ColumnRule::FirstSeen);

    match result {
        Err(PortalClientError::Decode { message, .. }) => {
            assert!(message.contains("row 0"), "Should name the row: {message}")
        }
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

/// **VALUE**: Verifies every decoded row length equals the kept column count.
///
/// **WHY THIS MATTERS**: Consumers zip headers with cells; any mismatch
/// misaligns the table.
///
/// **BUG THIS CATCHES**: Would catch projection and column lists diverging.
#[test]
fn given_many_rows_with_duplicates_when_decoded_then_row_width_matches_columns() {
    let names = ["a", "b", "a", "c", "b", "d"];
    let metadata: Vec<_> = names.iter().map(|n| json!({"colName": n})).collect();
    let resultset: Vec<_> = (0..25)
        .map(|i| names.iter().map(|_| json!(i)).collect::<Vec<_>>())
        .collect();
    let raw = body(json!({"metadata": metadata, "resultset": resultset}));

    for rule in [ColumnRule::FirstSeen, ColumnRule::DropTrailingColumn] {
        let result = decode(&raw, rule).unwrap();
        assert_eq!(result.rows.len(), 25);
        assert!(result.rows.iter().all(|row| row.len() == result.columns.len()));
        for (i, row) in result.rows.iter().enumerate() {
            assert_eq!(row[0].as_i64(), Some(i as i64), "Row order must be preserved");
        }
    }
}

/// **VALUE**: Verifies the projection index helper directly.
///
/// **WHY THIS MATTERS**: The rule must work on the de-duplicated list, and an
/// empty list must stay empty rather than underflow.
///
/// **BUG THIS CATCHES**: Would catch dropping from an empty list panicking.
#[test]
fn given_column_names_when_projecting_then_indices_follow_first_seen() {
    assert_eq!(
        projection_indices(["x", "y", "x", "z"], ColumnRule::FirstSeen),
        vec![0, 1, 3]
    );
    assert_eq!(
        projection_indices(["x", "y", "x", "z"], ColumnRule::DropTrailingColumn),
        vec![0, 1]
    );
    assert!(projection_indices([], ColumnRule::DropTrailingColumn).is_empty());
}

/// **VALUE**: Verifies row filtering by a named column (UF narrowing).
///
/// **WHY THIS MATTERS**: The price table is narrowed to the farm's UF before display.
///
/// **BUG THIS CATCHES**: Would catch filtering on the wrong column index.
#[test]
fn given_table_when_filtering_by_column_then_only_matching_rows_remain() {
    let raw = body(json!({
        "metadata": [{"colName": "UF"}, {"colName": "Price"}],
        "resultset": [["SP", 1.0], ["PR", 2.0], ["SP", 3.0]]
    }));
    let table = decode(&raw, ColumnRule::FirstSeen).unwrap();

    let sp = table.filter_rows("UF", "SP");
    let unknown = table.filter_rows("Missing", "SP");

    assert_eq!(sp.rows.len(), 2);
    assert_eq!(sp.cell(1, "Price").and_then(Cell::as_f64), Some(3.0));
    assert_eq!(unknown, table, "Unknown column leaves the table untouched");
}

/// **VALUE**: Verifies TabularResult serializes back to the portal's shape.
///
/// **WHY THIS MATTERS**: Callers forward the result to a frontend that reads
/// `metadata[].colName` and `resultset`.
///
/// **BUG THIS CATCHES**: Would catch serde renames being dropped.
#[test]
fn given_decoded_table_when_serialized_then_uses_metadata_and_resultset_keys() {
    let raw = body(json!({"metadata": [{"colName": "UF"}], "resultset": [["GO"]]}));
    let table = decode(&raw, ColumnRule::FirstSeen).unwrap();

    let json = serde_json::to_value(&table).unwrap();

    assert_eq!(json["metadata"][0]["colName"], "UF");
    assert_eq!(json["metadata"][0]["colIndex"], 0);
    assert_eq!(json["resultset"][0][0], "GO");
}
