use crate::query::QueryParams;
use serde::{Deserialize, Serialize};

/// Per-call options understood by every endpoint.
///
/// Every field is optional: `None` means "not set here", so that a call's
/// options can be layered over the client defaults without losing anything
/// the caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Pretty-print the response JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Restrict the response to these fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Expand these compact sub-objects into full records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,

    /// Page size for listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Opaque offset token taken from a previous page's cursor.
    /// An empty token means the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

impl Options {
    /// Empty options, overriding nothing
    pub fn new() -> Self {
        Options::default()
    }

    /// Ask for pretty-printed responses
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    /// Restrict the fields included in responses
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Expand the named fields into full objects
    pub fn with_expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = Some(expand.into_iter().map(Into::into).collect());
        self
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the pagination offset
    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.pretty.is_none()
            && self.fields.is_none()
            && self.expand.is_none()
            && self.limit.is_none()
            && self.offset.is_none()
    }

    /// Layer these options over `defaults`: fields set here win, unset
    /// fields fall back to the default.
    pub fn merged_over(&self, defaults: &Options) -> Options {
        Options {
            pretty: self.pretty.or(defaults.pretty),
            fields: self.fields.clone().or_else(|| defaults.fields.clone()),
            expand: self.expand.clone().or_else(|| defaults.expand.clone()),
            limit: self.limit.or(defaults.limit),
            offset: self.offset.clone().or_else(|| defaults.offset.clone()),
        }
    }

    /// Query parameters for read calls.
    ///
    /// Only set fields produce a key, so merging the result over earlier
    /// parameters leaves unrelated keys alone.
    pub fn to_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(pretty) = self.pretty {
            params.set("opt_pretty", pretty.to_string());
        }
        if let Some(ref fields) = self.fields {
            params.set("opt_fields", fields.join(","));
        }
        if let Some(ref expand) = self.expand {
            params.set("opt_expand", expand.join(","));
        }
        if let Some(limit) = self.limit {
            params.set("limit", limit.to_string());
        }
        match self.offset.as_deref() {
            Some("") | None => {}
            Some(offset) => params.set("offset", offset),
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_caller_fields() {
        let defaults = Options::new()
            .with_pretty(true)
            .with_fields(["name"])
            .with_limit(10);
        let call = Options::new().with_limit(100).with_offset("abc");

        let merged = call.merged_over(&defaults);
        assert_eq!(merged.limit, Some(100));
        assert_eq!(merged.offset.as_deref(), Some("abc"));
        assert_eq!(merged.pretty, Some(true));
        assert_eq!(merged.fields, Some(vec!["name".to_string()]));
        assert_eq!(merged.expand, None);
    }

    #[test]
    fn test_merge_explicit_false_is_kept() {
        let defaults = Options::new().with_pretty(true);
        let call = Options::new().with_pretty(false);
        assert_eq!(call.merged_over(&defaults).pretty, Some(false));
    }

    #[test]
    fn test_merge_over_empty_defaults_is_identity() {
        let call = Options::new().with_expand(["followers", "members"]);
        assert_eq!(call.merged_over(&Options::new()), call);
        assert_eq!(Options::new().merged_over(&call), call);
    }

    #[test]
    fn test_to_query_keys() {
        let options = Options::new()
            .with_pretty(true)
            .with_fields(["name", "notes"])
            .with_expand(["team"])
            .with_limit(50)
            .with_offset("tok");

        let query = options.to_query();
        assert_eq!(query.len(), 5);
        assert_eq!(query.get("opt_pretty"), Some(&["true".to_string()][..]));
        assert_eq!(query.get("opt_fields"), Some(&["name,notes".to_string()][..]));
        assert_eq!(query.get("opt_expand"), Some(&["team".to_string()][..]));
        assert_eq!(query.get("limit"), Some(&["50".to_string()][..]));
        assert_eq!(query.get("offset"), Some(&["tok".to_string()][..]));
    }

    #[test]
    fn test_empty_offset_means_first_page() {
        let query = Options::new().with_offset("").to_query();
        assert!(query.get("offset").is_none());
        assert!(Options::new().to_query().is_empty());
    }

    #[test]
    fn test_query_round_trip() {
        let options = Options::new()
            .with_fields(["gid", "name"])
            .with_limit(25)
            .with_offset("b/c=d");

        let echoed = QueryParams::parse(&options.to_query().encode());
        assert_eq!(echoed, options.to_query());
    }

    #[test]
    fn test_json_omits_unset_fields() {
        let options = Options::new().with_fields(["name"]);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({"fields": ["name"]}));
    }
}
