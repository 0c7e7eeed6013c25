// HTTP transport: POSTs the encoded form to the upload endpoint and hands
// back the raw result page. Blocking and single-shot; no retries.

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{CONNECTION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::config::{Endpoint, UploadSettings};
use crate::error::UploadError;
use crate::multipart::MultipartBody;

/// What came back from the server. Only ever built for a 200; anything
/// else is turned into `UploadError::ServerRejected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// Sends one encoded upload. The flow in `ui` only talks to this trait, so
/// tests can swap the network out.
pub trait Transport {
    /// Host named in error messages and used to absolutize scraped links.
    fn endpoint(&self) -> &Endpoint;

    fn post(&self, form: &MultipartBody) -> Result<UploadResponse, UploadError>;
}

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Endpoint,
    settings: UploadSettings,
}

impl HttpTransport {
    pub fn new(endpoint: Endpoint, settings: UploadSettings) -> Self {
        Self { endpoint, settings }
    }

    // A fresh client per upload with no idle pool: the socket is closed
    // once the response has been read or the request fails.
    fn build_client(&self) -> Result<Client, UploadError> {
        let mut builder = Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .pool_max_idle_per_host(0);
        if !self.settings.use_system_proxy {
            builder = builder.no_proxy();
        }
        builder
            .build()
            .map_err(|source| self.connection_error(source))
    }

    fn connection_error(&self, source: reqwest::Error) -> UploadError {
        UploadError::Connection {
            host: self.endpoint.host.clone(),
            source,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Endpoint::default(), UploadSettings::default())
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn post(&self, form: &MultipartBody) -> Result<UploadResponse, UploadError> {
        let url = self.endpoint.upload_url();
        let client = self.build_client()?;

        info!("uploading {} bytes to {}", form.body.len(), url);
        let res = client
            .post(&url)
            .header(CONTENT_TYPE, form.content_type.as_str())
            .header(CONNECTION, "close")
            .body(form.body.clone())
            .send()
            .map_err(|source| self.connection_error(source))?;

        let status = res.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        debug!("server answered {}", status);
        if status != StatusCode::OK {
            return Err(UploadError::ServerRejected {
                status: status.as_u16(),
                reason,
            });
        }

        let bytes = res.bytes().map_err(|source| self.connection_error(source))?;
        Ok(UploadResponse {
            status: status.as_u16(),
            reason,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
