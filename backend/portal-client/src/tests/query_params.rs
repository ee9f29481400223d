// Unit tests for the typed parameter map
// Tests centralized encoding and replacement semantics

use crate::query::{QueryParams, body_prefix};

/// **VALUE**: Verifies structured member values are encoded exactly once.
///
/// **WHY THIS MATTERS**: Values like `[Produto].[MILHO]` broke when callers
/// pre-encoded them and the transport encoded again.
///
/// **BUG THIS CATCHES**: Would catch double encoding (`%255B`) or raw brackets.
#[test]
fn given_member_value_when_encoded_then_brackets_are_percent_encoded_once() {
    let params = QueryParams::new().with("paramprodutoPreco", "[Produto].[MILHO]");

    let encoded = params.encode();

    assert_eq!(encoded, "paramprodutoPreco=%5BProduto%5D.%5BMILHO%5D");
    assert!(!encoded.contains("%25"), "Must not double-encode");
}

/// **VALUE**: Verifies pairs are joined with '&' in insertion order, values
/// with separators escaped.
///
/// **WHY THIS MATTERS**: An unescaped '&' or '=' in a municipality name would
/// split the form body into bogus parameters.
///
/// **BUG THIS CATCHES**: Would catch naive `format!("{k}={v}")` joining.
#[test]
fn given_values_with_separators_when_encoded_then_each_value_is_escaped() {
    let params = QueryParams::new()
        .with("a", "x&y=z")
        .with("b", "SÃO PAULO-SP")
        .with("c", "");

    let encoded = params.encode();

    assert_eq!(encoded, "a=x%26y%3Dz&b=S%C3%83O+PAULO-SP&c=");
}

/// **VALUE**: Verifies the CDA envelope and replacement-on-insert.
///
/// **WHY THIS MATTERS**: Dataset params are merged over the envelope; a
/// duplicate name must replace, not repeat.
///
/// **BUG THIS CATCHES**: Would catch duplicate keys in the request body.
#[test]
fn given_envelope_when_extended_then_names_are_unique_and_ordered() {
    let mut form = QueryParams::cda_envelope("/home/frete/frete.cda", "tabelaFretes");
    let extra = QueryParams::new()
        .with("pageSize", "0")
        .with("paramanoInicio", "2024");

    form.extend(&extra);

    assert_eq!(form.get("path"), Some("/home/frete/frete.cda"));
    assert_eq!(form.get("dataAccessId"), Some("tabelaFretes"));
    assert_eq!(form.iter().filter(|(name, _)| *name == "pageSize").count(), 1);
    assert_eq!(form.iter().last(), Some(("paramanoInicio", "2024")));
    assert_eq!(form.len(), 8);
}

/// **VALUE**: Verifies body truncation respects the byte limit and UTF-8.
///
/// **WHY THIS MATTERS**: Error pages can be huge; QueryError keeps a bounded
/// prefix. Cutting inside a multi-byte character must not panic.
///
/// **BUG THIS CATCHES**: Would catch slicing at a non-char boundary.
#[test]
fn given_long_body_when_prefixed_then_truncates_on_char_boundary() {
    let body = "é".repeat(400);

    let prefix = body_prefix(body.as_bytes(), 501);

    assert_eq!(prefix.len(), 500);
    assert_eq!(body_prefix(b"Internal error", 500), "Internal error");
}
