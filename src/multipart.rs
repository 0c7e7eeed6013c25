// Multipart encoder: builds the single-part form body the upload handler
// expects. We assemble it by hand rather than with `reqwest::multipart`
// because the service wants a fixed boundary and a specific header order.

use std::fs;
use std::path::Path;

use log::debug;

use crate::config::{BOUNDARY, FORM_FIELD};
use crate::error::UploadError;

const CRLF: &[u8] = b"\r\n";

/// A file read from disk and ready to be encoded.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub data: Vec<u8>,
    pub mime: String,
    pub boundary: &'static str,
}

/// Encoded form: the `Content-Type` header value and the raw body.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl UploadRequest {
    /// Read `path` fully and prepare it for upload under its base name.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let data = fs::read(path).map_err(|source| UploadError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = base_name(path);
        debug!("read {} bytes from {}", data.len(), path.display());
        Ok(Self::new(file_name, data))
    }

    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name);
        Self {
            file_name,
            data,
            mime,
            boundary: BOUNDARY,
        }
    }

    pub fn encode(&self) -> MultipartBody {
        encode(&self.file_name, &self.mime, self.boundary, &self.data)
    }
}

/// Last component of `path`, or the whole path if it has none.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// MIME type from the file name's extension only; no content sniffing.
pub fn guess_mime(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Join the form lines with CRLF. Header lines are written one byte per
/// character; `data` goes in untouched.
pub fn encode(file_name: &str, mime: &str, boundary: &str, data: &[u8]) -> MultipartBody {
    let header_lines = [
        format!("--{}", boundary),
        format!("Content-Type: {}", mime),
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            FORM_FIELD, file_name
        ),
        String::new(),
    ];

    let mut body = Vec::with_capacity(data.len() + 256);
    for line in &header_lines {
        body.extend(latin1_bytes(line));
        body.extend_from_slice(CRLF);
    }
    body.extend_from_slice(data);
    body.extend_from_slice(CRLF);
    body.extend(latin1_bytes(&format!("--{}--", boundary)));

    MultipartBody {
        content_type: format!("multipart/form-data; boundary={}", boundary),
        body,
    }
}

// Characters outside Latin-1 have no single-byte form; they become '?'.
fn latin1_bytes(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MIME;
    use pretty_assertions::assert_eq;

    fn payload_of<'a>(body: &'a [u8], boundary: &str) -> &'a [u8] {
        let header_end = body
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("header block terminator")
            + 4;
        let trailer = format!("\r\n--{}--", boundary);
        assert!(body.ends_with(trailer.as_bytes()));
        &body[header_end..body.len() - trailer.len()]
    }

    #[test]
    fn body_layout_matches_form_handler() {
        let encoded = encode("notes.txt", "text/plain", BOUNDARY, b"hello");
        let expected = "------------B0und@ry!\r\n\
             Content-Type: text/plain\r\n\
             Content-Disposition: form-data; name=\"file1\"; filename=\"notes.txt\"\r\n\
             \r\n\
             hello\r\n\
             ------------B0und@ry!--";
        assert_eq!(String::from_utf8_lossy(&encoded.body), expected);
        assert_eq!(
            encoded.content_type,
            "multipart/form-data; boundary=----------B0und@ry!"
        );
    }

    #[test]
    fn binary_payload_is_preserved() {
        let data: Vec<u8> = vec![0, 159, 146, 150, 0, b'\r', b'\n', 255, 0];
        let encoded = encode("blob.bin", DEFAULT_MIME, BOUNDARY, &data);
        assert_eq!(payload_of(&encoded.body, BOUNDARY), data.as_slice());
    }

    #[test]
    fn empty_payload_is_preserved() {
        let encoded = encode("empty", DEFAULT_MIME, BOUNDARY, b"");
        assert_eq!(payload_of(&encoded.body, BOUNDARY), b"");
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(guess_mime("shot.png"), "image/png");
        assert_eq!(guess_mime("page.html"), "text/html");
        assert_eq!(guess_mime("archive.unknownext"), "application/octet-stream");
        assert_eq!(guess_mime("Makefile"), "application/octet-stream");
    }

    #[test]
    fn request_uses_base_name_and_guessed_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let request = UploadRequest::from_path(&path).unwrap();
        assert_eq!(request.file_name, "picture.png");
        assert_eq!(request.mime, "image/png");

        let encoded = request.encode();
        let text = String::from_utf8_lossy(&encoded.body);
        assert!(text.contains("Content-Type: image/png\r\n"));
        assert!(text.contains("filename=\"picture.png\""));
        assert_eq!(payload_of(&encoded.body, BOUNDARY), &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        match UploadRequest::from_path(&path) {
            Err(UploadError::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileRead, got {:?}", other),
        }
    }

    #[test]
    fn non_latin1_names_degrade_to_question_marks() {
        let encoded = encode("é☃.txt", "text/plain", BOUNDARY, b"");
        let needle = b"filename=\"\xe9?.txt\"";
        assert!(encoded.body.windows(needle.len()).any(|w| w == needle));
    }
}
