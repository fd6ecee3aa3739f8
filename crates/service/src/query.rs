//! Query-string normalization.
//!
//! Raw query parameters arrive as `(key, value)` pairs where a key may repeat.
//! [`normalize_query`] folds them into a [`QueryParams`] map once, at the
//! boundary, so the rest of the crate matches on [`QueryValue`] instead of
//! re-inspecting strings:
//!
//! - one value equal to `true`/`false` (any case) becomes [`QueryValue::Flag`]
//! - one other value becomes [`QueryValue::Scalar`]
//! - several values stay a [`QueryValue::List`] in arrival order
//! - a key with no values is dropped, so lookups fall back to the caller's default

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    Flag(bool),
    List(Vec<String>),
}

impl QueryValue {
    /// Single raw value with the `true`/`false` rule applied.
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            QueryValue::Flag(true)
        } else if raw.eq_ignore_ascii_case("false") {
            QueryValue::Flag(false)
        } else {
            QueryValue::Scalar(raw.to_string())
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            QueryValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Scalar(s) => f.write_str(s),
            QueryValue::Flag(b) => write!(f, "{b}"),
            QueryValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

/// Normalized query parameters of one request.
///
/// The first raw spelling of every key is kept next to the normalized value,
/// so exact-match filters can see `TRUE` even though it normalizes to a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, QueryValue>,
    raw: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, key: &str) -> Option<&QueryValue> { self.values.get(key) }

    /// First value of `key` exactly as it arrived.
    pub fn raw(&self, key: &str) -> Option<&str> { self.raw.get(key).map(String::as_str) }

    /// Builder that treats `value` as the single raw value of `key`.
    #[cfg(test)]
    pub(crate) fn with(mut self, key: impl Into<String>, value: &str) -> Self {
        let key = key.into();
        self.values.insert(key.clone(), QueryValue::coerce(value));
        self.raw.insert(key, value.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool { self.values.contains_key(key) }
}

/// Normalize the raw value sequence of a single key. `None` for an empty sequence.
pub fn normalize_query_param(mut raw: Vec<String>) -> Option<QueryValue> {
    match raw.len() {
        0 => None,
        1 => raw.pop().map(|v| QueryValue::coerce(&v)),
        _ => Some(QueryValue::List(raw)),
    }
}

/// Group raw pairs by key (keeping value order) and normalize each key.
pub fn normalize_query<I, K, V>(pairs: I) -> QueryParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (k, v) in pairs {
        grouped.entry(k.into()).or_default().push(v.into());
    }
    let mut params = QueryParams::new();
    for (key, values) in grouped {
        let first = values.first().cloned();
        if let (Some(value), Some(first)) = (normalize_query_param(values), first) {
            params.raw.insert(key.clone(), first);
            params.values.insert(key, value);
        }
    }
    params
}

fn select(params: Option<&QueryParams>, key: &str, default: Option<QueryValue>) -> Option<QueryValue> {
    match params {
        None => default,
        Some(p) => p.get(key).cloned().or(default),
    }
}

/// Single-valued lookup: the first element of a list, with boolean coercion.
/// Missing `params` or key yields `default`.
pub fn get_query_param(params: Option<&QueryParams>, key: &str, default: Option<QueryValue>) -> Option<QueryValue> {
    match select(params, key, default)? {
        QueryValue::List(items) => items.first().map(|v| QueryValue::coerce(v)),
        QueryValue::Scalar(s) => Some(QueryValue::coerce(&s)),
        flag @ QueryValue::Flag(_) => Some(flag),
    }
}

/// Multi-valued lookup: scalars are wrapped, list elements coerced one by one.
/// Missing `params` or key yields `default` wrapped, or an empty vector.
pub fn get_query_params(params: Option<&QueryParams>, key: &str, default: Option<QueryValue>) -> Vec<QueryValue> {
    match select(params, key, default) {
        None => Vec::new(),
        Some(QueryValue::List(items)) => items.iter().map(|v| QueryValue::coerce(v)).collect(),
        Some(QueryValue::Scalar(s)) => vec![QueryValue::coerce(&s)],
        Some(flag @ QueryValue::Flag(_)) => vec![flag],
    }
}

pub fn is_query_param_present(params: Option<&QueryParams>, key: &str) -> bool {
    params.is_some_and(|p| p.contains(key))
}

pub fn require_query_param(params: Option<&QueryParams>, key: &str) -> Result<(), ServiceError> {
    if is_query_param_present(params, key) {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!("{key} is not specified")))
    }
}

/// True only when `key` coerces to `Flag(true)`.
pub fn query_flag(params: Option<&QueryParams>, key: &str) -> bool {
    matches!(get_query_param(params, key, None), Some(QueryValue::Flag(true)))
}

/// Integer lookup; absent or unparsable values give `default`.
pub fn query_u64(params: Option<&QueryParams>, key: &str, default: u64) -> u64 {
    get_query_param(params, key, None)
        .and_then(|v| v.as_text().and_then(|s| s.trim().parse::<u64>().ok()))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<String> { values.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn single_boolean_strings_become_flags_in_any_case() {
        for (input, expected) in [("true", true), ("TRUE", true), ("True", true), ("false", false), ("fAlSe", false)] {
            assert_eq!(normalize_query_param(raw(&[input])), Some(QueryValue::Flag(expected)), "{input}");
        }
    }

    #[test]
    fn single_other_value_is_bare_string() {
        assert_eq!(normalize_query_param(raw(&["abc"])), Some(QueryValue::Scalar("abc".into())));
        assert_eq!(normalize_query_param(raw(&["truthy"])), Some(QueryValue::Scalar("truthy".into())));
        assert_eq!(normalize_query_param(raw(&[""])), Some(QueryValue::Scalar(String::new())));
    }

    #[test]
    fn multi_values_stay_list_unchanged() {
        assert_eq!(
            normalize_query_param(raw(&["true", "x"])),
            Some(QueryValue::List(raw(&["true", "x"])))
        );
    }

    #[test]
    fn empty_sequence_is_dropped() {
        assert_eq!(normalize_query_param(Vec::new()), None);
    }

    #[test]
    fn normalize_query_groups_repeated_keys_in_order() {
        let params = normalize_query([("tag", "a"), ("page", "2"), ("tag", "b"), ("itemized", "True")]);
        assert!(!params.contains("missing"));
        assert_eq!(params.get("tag"), Some(&QueryValue::List(raw(&["a", "b"]))));
        assert_eq!(params.get("page"), Some(&QueryValue::Scalar("2".into())));
        assert_eq!(params.get("itemized"), Some(&QueryValue::Flag(true)));
    }

    #[test]
    fn raw_spelling_survives_normalization() {
        let params = normalize_query([("title", "TRUE"), ("tag", "a"), ("tag", "b")]);
        assert_eq!(params.get("title"), Some(&QueryValue::Flag(true)));
        assert_eq!(params.raw("title"), Some("TRUE"));
        assert_eq!(params.raw("tag"), Some("a"));
        assert_eq!(params.raw("missing"), None);
        assert_eq!(QueryParams::new().with("done", "False").raw("done"), Some("False"));
    }

    #[test]
    fn get_query_param_takes_first_of_list_and_coerces() {
        let params = normalize_query([("title", "false"), ("title", "b")]);
        assert_eq!(get_query_param(Some(&params), "title", None), Some(QueryValue::Flag(false)));
    }

    #[test]
    fn get_query_param_falls_back_to_default() {
        let params = QueryParams::new();
        let default = Some(QueryValue::Scalar("1".into()));
        assert_eq!(get_query_param(Some(&params), "page", default.clone()), default);
        assert_eq!(get_query_param(None, "page", default.clone()), default);
        assert_eq!(get_query_param(Some(&params), "page", None), None);
    }

    #[test]
    fn default_strings_are_coerced_too() {
        let got = get_query_param(None, "itemized", Some(QueryValue::Scalar("TRUE".into())));
        assert_eq!(got, Some(QueryValue::Flag(true)));
    }

    #[test]
    fn get_query_params_wraps_and_coerces() {
        let params = normalize_query([("a", "x"), ("b", "1"), ("b", "true")]);
        assert_eq!(get_query_params(Some(&params), "a", None), vec![QueryValue::Scalar("x".into())]);
        assert_eq!(
            get_query_params(Some(&params), "b", None),
            vec![QueryValue::Scalar("1".into()), QueryValue::Flag(true)]
        );
        assert!(get_query_params(Some(&params), "missing", None).is_empty());
    }

    #[test]
    fn presence_checks() {
        let params = QueryParams::new().with("title", "t");
        assert!(is_query_param_present(Some(&params), "title"));
        assert!(!is_query_param_present(None, "title"));
        assert!(require_query_param(Some(&params), "title").is_ok());
        let err = require_query_param(Some(&params), "page").unwrap_err();
        assert_eq!(err.client_message(), "page is not specified");
    }

    #[test]
    fn integer_lookup_never_fails() {
        let params = normalize_query([("page", "abc"), ("per_page", " 5 "), ("neg", "-3")]);
        assert_eq!(query_u64(Some(&params), "page", 1), 1);
        assert_eq!(query_u64(Some(&params), "per_page", 20), 5);
        assert_eq!(query_u64(Some(&params), "neg", 20), 20);
        assert_eq!(query_u64(None, "page", 1), 1);
    }

    #[test]
    fn flag_lookup_only_true_for_true() {
        let params = normalize_query([("itemized", "true"), ("itemize", "yes")]);
        assert!(query_flag(Some(&params), "itemized"));
        assert!(!query_flag(Some(&params), "itemize"));
        assert!(!query_flag(None, "itemized"));
    }
}
