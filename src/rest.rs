use crate::client::{create_http_client, Config};
use crate::error::{RestError, Result};
use crate::multipart::MultipartBody;
use crate::options::Options;
use crate::page::{fetch_all, NextPage, DEFAULT_PAGE_SIZE};
use crate::query::QueryParams;
use crate::request::{RequestEnvelope, Validate};
use crate::response::Response;
use crate::token::Token;
use reqwest::blocking::{Body, Client as HttpClient, Request, RequestBuilder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::time::Instant;

/// Header asking the service for its faster response mode
pub const FAST_API_HEADER: &str = "Asana-Fast-Api";

/// Root client for the Asana API.
///
/// The client is read-only while a call runs, so one instance (or clones of
/// it, which share the connection pool) can serve many threads at once.
/// Every call blocks until the response body has been read.
#[derive(Debug, Clone)]
pub struct Client {
    /// HTTP client
    pub http: HttpClient,
    /// Configuration
    pub config: Config,
    /// Optional authentication token
    pub token: Option<Token>,
}

impl Client {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let http = create_http_client()
            .map_err(|e| RestError::RequestBuild(format!("unable to create HTTP client: {}", e)))?;
        Ok(Self::with_http_client(http, config))
    }

    /// Create a client on top of an existing HTTP client.
    ///
    /// Timeouts and proxies configured on `http` apply to every call.
    pub fn with_http_client(http: HttpClient, config: Config) -> Self {
        Client {
            http,
            config,
            token: None,
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Turn the fast-mode header on or off
    pub fn set_fast_api(&mut self, fast_api: bool) {
        self.config.fast_api = fast_api;
    }

    /// Set the log level of resource call sites (1 = info, 2 = trace)
    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.config.verbosity = verbosity;
    }

    /// Replace the options applied under every call
    pub fn set_default_options(&mut self, options: Options) {
        self.config.default_options = options;
    }

    /// Read call.
    ///
    /// Query parameters are layered in this order, each layer replacing the
    /// keys it sets: client default options, the `query` value, then each
    /// entry of `opts`.
    ///
    /// Returns the decoded data and the cursor to the next page, if any.
    pub fn get<T, Q>(
        &self,
        path: &str,
        query: Option<&Q>,
        opts: &[&Options],
    ) -> Result<(T, Option<NextPage>)>
    where
        T: DeserializeOwned,
        Q: Serialize + Validate + ?Sized,
    {
        if self.config.debug {
            tracing::debug!(options = ?self.config.default_options, "default options");
        }
        let mut params = self.config.default_options.to_query();

        if let Some(query) = query {
            query.validate()?;
            let query_params = QueryParams::from_value(query, "request")?;
            if self.config.debug {
                tracing::debug!(params = %query_params.encode(), "request data");
            }
            params.merge(query_params);
        }

        for options in opts {
            if self.config.debug {
                tracing::debug!(options = ?options, "call options");
            }
            params.merge(options.to_query());
        }

        let mut url = self.config.url_for(path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.encode());
        }

        if self.config.debug {
            tracing::debug!("GET {}", url);
        }
        let request = self.build(self.request(Method::GET, &url))?;
        let response = self.send(Method::GET, path, request)?;

        let data = response.apply()?;
        Ok((data, response.next_page))
    }

    /// Create call with a JSON body
    pub fn post<T, P>(&self, path: &str, data: &P, opts: Option<&Options>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + Validate + ?Sized,
    {
        self.write(Method::POST, path, data, opts)
    }

    /// Update call with a JSON body
    pub fn put<T, P>(&self, path: &str, data: &P, opts: Option<&Options>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + Validate + ?Sized,
    {
        self.write(Method::PUT, path, data, opts)
    }

    fn write<T, P>(&self, method: Method, path: &str, data: &P, opts: Option<&Options>) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + Validate + ?Sized,
    {
        let defaults = &self.config.default_options;
        let options = match opts {
            Some(options) => options.merged_over(defaults),
            None => defaults.clone(),
        };

        data.validate()?;

        let envelope = RequestEnvelope::new(data, &options);
        let body = serde_json::to_vec(&envelope).map_err(RestError::Serialize)?;

        if self.config.debug {
            let pretty = serde_json::to_string_pretty(&envelope).unwrap_or_default();
            tracing::debug!("{} {}\n{}", method, path, pretty);
        }

        let url = self.config.url_for(path);
        let request = self.build(
            self.request(method.clone(), &url)
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        )?;
        let response = self.send(method, path, request)?;

        response.apply()
    }

    /// Upload a single file as `multipart/form-data`.
    ///
    /// `reader` is streamed into the request body, never read into memory
    /// as a whole. It is dropped before this returns, whatever the outcome.
    /// `field`, `filename` and `content_type` must not contain CR or LF.
    pub fn post_multipart<T, R>(
        &self,
        path: &str,
        field: &str,
        reader: R,
        filename: &str,
        content_type: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        R: Read + Send + 'static,
    {
        if self.config.debug {
            tracing::debug!(
                "POST multipart {}\n{}={};ContentType={}",
                path,
                field,
                filename,
                content_type
            );
        }

        let body = MultipartBody::new(field, filename, content_type, reader)?;
        let body_type = body.content_type();

        let url = self.config.url_for(path);
        let request = self.build(
            self.request(Method::POST, &url)
                .header(CONTENT_TYPE, body_type)
                .body(Body::new(body.into_reader())),
        )?;
        let response = self.send(Method::POST, path, request)?;

        response.apply()
    }

    /// Read every page of a listing.
    ///
    /// Pages are requested with a limit of [`DEFAULT_PAGE_SIZE`] unless
    /// `opts` sets one. The cursor offset is applied after `opts`.
    pub fn get_all<T, Q>(&self, path: &str, query: Option<&Q>, opts: &[&Options]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + Validate + ?Sized,
    {
        let page_size = Options::new().with_limit(DEFAULT_PAGE_SIZE);

        fetch_all(|cursor| {
            let offset = cursor.map(NextPage::options).unwrap_or_default();

            let mut layered: Vec<&Options> = Vec::with_capacity(opts.len() + 2);
            layered.push(&page_size);
            layered.extend_from_slice(opts);
            layered.push(&offset);

            self.get::<Vec<T>, Q>(path, query, &layered)
        })
    }

    pub(crate) fn info(&self, args: fmt::Arguments<'_>) {
        if self.config.verbosity >= 1 {
            tracing::info!("{}", args);
        }
    }

    pub(crate) fn trace(&self, args: fmt::Arguments<'_>) {
        if self.config.verbosity >= 2 {
            tracing::trace!("{}", args);
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if self.config.fast_api {
            request = request.header(FAST_API_HEADER, "true");
        }
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, token.authorization());
        }
        request
    }

    fn build(&self, request: RequestBuilder) -> Result<Request> {
        request
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))
    }

    fn send(&self, method: Method, path: &str, request: Request) -> Result<Response> {
        let start = Instant::now();
        let http_response = self
            .http
            .execute(request)
            .map_err(|source| RestError::Transport {
                method: method.clone(),
                path: path.to_string(),
                source,
            })?;

        let status = http_response.status();
        let retry_after = http_response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        // Reading the body to the end hands the connection back to the pool
        let body = http_response
            .bytes()
            .map_err(|source| RestError::Transport {
                method: method.clone(),
                path: path.to_string(),
                source,
            })?;

        if self.config.debug {
            tracing::debug!(
                "{} {} => {:?} ({})\n{}",
                method,
                path,
                start.elapsed(),
                status,
                String::from_utf8_lossy(&body)
            );
        }

        Response::from_http(&method, path, status.as_u16(), retry_after, &body)
    }
}
