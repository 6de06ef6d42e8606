use crate::error::ValidationError;
use crate::options::Options;
use serde::Serialize;
use serde_json::Value;

/// Payloads that can check themselves before they are sent.
///
/// The default implementation accepts everything; types with real
/// constraints override `validate`. A failure aborts the call before any
/// request is built.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for () {}

impl Validate for Value {}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> Result<(), ValidationError> {
        (**self).validate()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

/// Body of a write call: `{"data": ..., "options": ...}`
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, P: ?Sized> {
    pub data: &'a P,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a Options>,
}

impl<'a, P: Serialize + ?Sized> RequestEnvelope<'a, P> {
    /// Wrap `data`; empty options are left out of the body
    pub fn new(data: &'a P, options: &'a Options) -> Self {
        RequestEnvelope {
            data,
            options: if options.is_empty() { None } else { Some(options) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeedsName(&'static str);

    impl Validate for NeedsName {
        fn validate(&self) -> Result<(), ValidationError> {
            if self.0.is_empty() {
                return Err(ValidationError::new("name is required"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_validation_accepts() {
        assert!(().validate().is_ok());
        assert!(serde_json::json!({"a": 1}).validate().is_ok());
    }

    #[test]
    fn test_validation_through_references_and_options() {
        assert!(NeedsName("").validate().is_err());
        assert!((&NeedsName("x")).validate().is_ok());
        assert!(Some(NeedsName("")).validate().is_err());
        assert!(None::<NeedsName>.validate().is_ok());
    }

    #[test]
    fn test_envelope_omits_empty_options() {
        let data = serde_json::json!({"name": "Launch"});
        let options = Options::new();
        let body = serde_json::to_value(RequestEnvelope::new(&data, &options)).unwrap();
        assert_eq!(body, serde_json::json!({"data": {"name": "Launch"}}));
    }

    #[test]
    fn test_envelope_carries_options() {
        let data = serde_json::json!({"name": "Launch"});
        let options = Options::new().with_pretty(true);
        let body = serde_json::to_value(RequestEnvelope::new(&data, &options)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"data": {"name": "Launch"}, "options": {"pretty": true}})
        );
    }
}
