//! Column type normalization.

/// Normalize a free-form column type spelling for DDL emission.
///
/// Collapses any space immediately before an open parenthesis
/// (`NUMERIC (10, 2)` becomes `NUMERIC(10, 2)`). Everything else, including
/// the parameter list inside the parentheses, passes through untouched.
/// This is a syntactic fix only; precision and scale are never altered.
pub fn normalize_type(data_type: &str) -> String {
    data_type.replace(" (", "(")
}
