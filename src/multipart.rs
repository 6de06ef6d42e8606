use crate::error::ValidationError;
use rand::RngCore;
use std::fmt::Write as _;
use std::io::{Cursor, Read};

/// A `multipart/form-data` body with a single file part.
///
/// Only the part header and the closing boundary are held in memory; the
/// file content is read straight from `reader` while the request is sent.
/// The reader is owned by the body and dropped with it.
pub struct MultipartBody<R> {
    boundary: String,
    header: Vec<u8>,
    reader: R,
    footer: Vec<u8>,
}

impl<R: Read> MultipartBody<R> {
    /// Create a body with a random boundary
    pub fn new(
        field: &str,
        filename: &str,
        content_type: &str,
        reader: R,
    ) -> Result<Self, ValidationError> {
        Self::with_boundary(random_boundary(), field, filename, content_type, reader)
    }

    /// Create a body with a fixed boundary.
    ///
    /// Fails if `field`, `filename` or `content_type` contains a line break,
    /// which would end the part header early.
    pub fn with_boundary(
        boundary: String,
        field: &str,
        filename: &str,
        content_type: &str,
        reader: R,
    ) -> Result<Self, ValidationError> {
        for (name, value) in [
            ("field name", field),
            ("filename", filename),
            ("content type", content_type),
        ] {
            if value.contains(['\r', '\n']) {
                return Err(ValidationError::new(format!(
                    "multipart {} must not contain line breaks",
                    name
                )));
            }
        }

        let header = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: {content_type}\r\n\
             \r\n",
            escape_quotes(field),
            escape_quotes(filename),
        )
        .into_bytes();
        let footer = format!("\r\n--{boundary}--\r\n").into_bytes();

        Ok(MultipartBody {
            boundary,
            header,
            reader,
            footer,
        })
    }

    /// Boundary separating the part from the rest of the body
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request's `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Header, file content and footer as one stream
    pub fn into_reader(self) -> impl Read {
        Cursor::new(self.header)
            .chain(self.reader)
            .chain(Cursor::new(self.footer))
    }
}

/// Escape `\` and `"` for use inside a quoted header parameter
pub fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn random_boundary() -> String {
    let mut bytes = [0u8; 30];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().fold(String::with_capacity(60), |mut out, b| {
        let _ = write!(out, "{:02x}", b);
        out
    })
}
