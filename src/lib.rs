//! # asana - client for the Asana REST API
//!
//! A blocking Rust client for the Asana API. It turns typed values into
//! authenticated HTTP requests and decodes the service's
//! `{data, next_page, errors}` envelope back into typed results.
//!
//! ## Features
//!
//! - Four transport primitives: `get`, `post`, `put` and `post_multipart`
//! - Layered [`Options`]: client defaults, filter values and per-call
//!   options, later layers replacing earlier ones key by key
//! - Payload self-validation through the [`Validate`] trait
//! - Cursor pagination with an all-or-nothing [`fetch_all`] loop
//! - Streamed file uploads that never buffer the file
//! - Structured [`ApiError`]s carrying the service's error list
//!
//! ## Basic Usage
//!
//! ```no_run
//! use asana::{Client, Options, Token, Workspace};
//!
//! fn main() -> Result<(), asana::RestError> {
//!     let client = Client::new()?.with_token(Token::new("0/personal-access-token"));
//!
//!     let workspace = Workspace::new("1234");
//!     let fields = Options::new().with_fields(["name", "due_date"]);
//!
//!     for project in client.all_projects(&workspace, &[&fields])? {
//!         println!("{} {}", project.gid, project.base.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Paging by hand
//!
//! ```no_run
//! use asana::{Client, Options, Workspace};
//!
//! let client = Client::new()?;
//! let workspace = Workspace::new("1234");
//!
//! let mut options = Options::new().with_limit(50);
//! loop {
//!     let (projects, next_page) = client.projects(&workspace, &[&options])?;
//!     println!("{} projects", projects.len());
//!     match next_page {
//!         Some(page) => options.offset = Some(page.offset),
//!         None => break,
//!     }
//! }
//! # Ok::<(), asana::RestError>(())
//! ```

pub mod attachment;
pub mod client;
pub mod date;
pub mod error;
pub mod multipart;
pub mod options;
pub mod page;
pub mod project;
pub mod query;
pub mod request;
pub mod response;
pub mod rest;
pub mod section;
pub mod token;
pub mod workspace;

// Re-export main types for convenience
pub use attachment::Attachment;
pub use client::{create_http_client, Config, BASE_URL};
pub use date::Date;
pub use error::{ApiError, ErrorDetail, ErrorKind, RestError, Result, ValidationError};
pub use multipart::MultipartBody;
pub use options::Options;
pub use page::{fetch_all, NextPage, DEFAULT_PAGE_SIZE};
pub use project::{CreateProjectRequest, Layout, Project, ProjectBase, ProjectStatus};
pub use query::QueryParams;
pub use request::Validate;
pub use response::Response;
pub use rest::{Client, FAST_API_HEADER};
pub use section::{Section, SectionBase, SectionInsertRequest};
pub use token::Token;
pub use workspace::{Team, User, Workspace};
