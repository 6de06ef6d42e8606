use crate::error::{ApiError, ErrorDetail, RestError, Result};
use crate::page::NextPage;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

/// The envelope every API call answers with.
///
/// `data` is kept as raw JSON and only decoded when the caller asks for a
/// concrete type through [`Response::apply`]. The response remembers which
/// call produced it so that decode failures can name it.
#[derive(Debug)]
pub struct Response {
    /// Response data payload
    pub data: Option<Box<RawValue>>,

    /// Cursor to the next page, for listings
    pub next_page: Option<NextPage>,

    /// Errors reported by the service
    pub errors: Vec<ErrorDetail>,

    method: Method,
    path: String,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Box<RawValue>>,

    #[serde(default)]
    next_page: Option<NextPage>,

    #[serde(default, deserialize_with = "null_as_empty")]
    errors: Vec<ErrorDetail>,
}

impl Response {
    /// Decode and classify the HTTP response to `method` `path`.
    ///
    /// 200 and 201 are the only success statuses. Any other status becomes
    /// an [`ApiError`] carrying the envelope's `errors`. A success without
    /// `data` is rejected as [`RestError::MissingData`].
    pub fn from_http(
        method: &Method,
        path: &str,
        status: u16,
        retry_after: Option<u64>,
        body: &[u8],
    ) -> Result<Response> {
        let envelope: Envelope =
            serde_json::from_slice(body).map_err(|source| RestError::Decode {
                method: method.clone(),
                path: path.to_string(),
                status,
                source,
            })?;

        match status {
            200 | 201 => {}
            _ => {
                let error = ApiError::new(method.clone(), path, status, envelope.errors, retry_after);
                return Err(error.into());
            }
        }

        if envelope.data.is_none() {
            return Err(RestError::MissingData {
                method: method.clone(),
                path: path.to_string(),
            });
        }

        Ok(Response {
            data: envelope.data,
            next_page: envelope.next_page,
            errors: envelope.errors,
            method: method.clone(),
            path: path.to_string(),
        })
    }

    /// Get the raw data payload
    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref().map(RawValue::get)
    }

    /// Apply unmarshals the response data into the provided type
    pub fn apply<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self.data.as_deref().ok_or_else(|| RestError::MissingData {
            method: self.method.clone(),
            path: self.path.clone(),
        })?;
        serde_json::from_str(data.get()).map_err(|source| RestError::DataDecode {
            method: self.method.clone(),
            path: self.path.clone(),
            source,
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<ErrorDetail>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ErrorDetail>>::deserialize(deserializer)?.unwrap_or_default())
}
