use crate::error::{RestError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// URL query parameters, keyed by name.
///
/// Keys are kept sorted so the encoded string is stable for a given set of
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Empty parameter set
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Turn a typed value (usually a filter struct) into query parameters.
    ///
    /// The value must serialize to a JSON object. `null` fields are skipped,
    /// arrays are joined with commas and scalars are rendered as text.
    /// `stage` names the value in the error message.
    pub fn from_value<T: Serialize + ?Sized>(value: &T, stage: &'static str) -> Result<Self> {
        let json = serde_json::to_value(value).map_err(|e| RestError::Query {
            stage,
            message: e.to_string(),
        })?;

        let object = match json {
            Value::Null => return Ok(QueryParams::new()),
            Value::Object(object) => object,
            other => {
                return Err(RestError::Query {
                    stage,
                    message: format!("expected an object, got {}", type_name(&other)),
                })
            }
        };

        let mut params = QueryParams::new();
        for (key, value) in object {
            let rendered = match value {
                Value::Null => continue,
                Value::Array(items) => {
                    let mut parts = Vec::with_capacity(items.len());
                    for item in &items {
                        match scalar(item) {
                            Some(part) => parts.push(part),
                            None => {
                                return Err(RestError::Query {
                                    stage,
                                    message: format!("unsupported {} in list {:?}", type_name(item), key),
                                })
                            }
                        }
                    }
                    if parts.is_empty() {
                        continue;
                    }
                    parts.join(",")
                }
                other => scalar(&other).ok_or_else(|| RestError::Query {
                    stage,
                    message: format!("unsupported nested {} for key {:?}", type_name(&other), key),
                })?,
            };
            params.set(key, rendered);
        }

        Ok(params)
    }

    /// Replace every value of `key` with `value`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![value.into()]);
    }

    /// Add a value to `key`, keeping existing ones
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// Merge a later source over this one.
    ///
    /// For every key present in `later`, the values collected so far are
    /// dropped and replaced by `later`'s values. Other keys are untouched.
    pub fn merge(&mut self, later: QueryParams) {
        for (key, values) in later.params {
            self.params.insert(key, values);
        }
    }

    /// Values of `key`, if set
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when no key is set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.params {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Decode a query string, e.g. one echoed back by the server
    pub fn parse(query: &str) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            params.append(key.into_owned(), value.into_owned());
        }
        params
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
