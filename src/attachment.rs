use crate::error::Result;
use crate::rest::Client;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A file attached to a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub gid: String,

    #[serde(default)]
    pub name: String,

    /// Service hosting the file, e.g. "asana", "dropbox"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Attach a file to a task, streaming it from `reader`
    pub fn upload_attachment<R>(
        &self,
        task_gid: &str,
        reader: R,
        filename: &str,
        content_type: &str,
    ) -> Result<Attachment>
    where
        R: Read + Send + 'static,
    {
        self.info(format_args!("Uploading attachment {:?} to task {}", filename, task_gid));
        self.post_multipart(
            &format!("/tasks/{}/attachments", task_gid),
            "file",
            reader,
            filename,
            content_type,
        )
    }
}
