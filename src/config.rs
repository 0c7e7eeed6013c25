// Fixed upload target and request settings. None of these change at
// runtime; the only configurable surface is the command line.

use std::time::Duration;

/// Host that receives uploads.
pub const UPLOAD_HOST: &str = "ompldr.org";

/// Path the multipart form is POSTed to.
pub const UPLOAD_PATH: &str = "/upload";

/// Scheme used for the upload and for the links we hand back.
pub const URL_SCHEME: &str = "http";

/// Multipart boundary token. The service accepts a fixed one.
pub const BOUNDARY: &str = "----------B0und@ry!";

/// Name of the form field carrying the file.
pub const FORM_FIELD: &str = "file1";

/// MIME type used when the file extension tells us nothing.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Where an upload goes. `Endpoint::default()` is the real service;
/// tests point it at a local listener instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub path: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: UPLOAD_HOST.to_string(),
            path: UPLOAD_PATH.to_string(),
        }
    }
}

impl Endpoint {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Absolute URL of the upload form handler.
    pub fn upload_url(&self) -> String {
        format!("{}://{}{}", URL_SCHEME, self.host, self.path)
    }

    /// Prefix prepended to scraped relative paths.
    pub fn base_url(&self) -> String {
        format!("{}://{}", URL_SCHEME, self.host)
    }
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Honour `HTTP_PROXY` and friends.
    pub use_system_proxy: bool,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            use_system_proxy: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_targets_the_upload_service() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.upload_url(), "http://ompldr.org/upload");
        assert_eq!(endpoint.base_url(), "http://ompldr.org");
    }

    #[test]
    fn custom_endpoint_keeps_port() {
        let endpoint = Endpoint::new("127.0.0.1:8080", "/up");
        assert_eq!(endpoint.upload_url(), "http://127.0.0.1:8080/up");
    }
}
