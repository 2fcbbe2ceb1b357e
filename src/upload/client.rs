use crate::config::Settings;
use crate::error::{Result, UploadError};
use crate::upload::body::ProgressBody;
use base64::{engine::general_purpose::STANDARD, Engine};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// `Basic` credentials header value. Characters outside ASCII are sent as `?`.
pub fn basic_auth_value(username: &str, password: &str) -> String {
    let credentials: String = format!("{}:{}", username, password)
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect();
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

/// `{endpoint}/{file name}`. A single trailing slash on the endpoint is dropped
/// so the two are always joined by exactly one `/`.
pub fn target_url(endpoint: &str, file_path: &Path) -> Result<String> {
    let file_name = file_path
        .file_name()
        .ok_or_else(|| UploadError::InvalidFileName(file_path.to_path_buf()))?
        .to_string_lossy();
    let endpoint = endpoint.strip_suffix('/').unwrap_or(endpoint);
    Ok(format!("{}/{}", endpoint, file_name))
}

/// Blocking HTTP client that carries the `Authorization` header on every
/// request.
pub struct WebDavClient {
    client: Client,
}

impl WebDavClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&basic_auth_value(
            &settings.username,
            &settings.password,
        ))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self { client })
    }

    pub fn put(&self, url: &str, body: ProgressBody<File>) -> Result<StatusCode> {
        debug!("PUT {} ({} bytes)", url, body.content_length());
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(body.into_body())
            .send()?;
        Ok(response.status())
    }
}
