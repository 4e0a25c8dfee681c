// Download orchestration: drives the lookup and download flows against
// the session state machine and persists the payload locally

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::api::ApiClient;
use super::catalog::FormatCatalog;
use super::errors::ClientError;
use super::models::DownloadRequest;
use super::session::Session;

lazy_static! {
    // RFC 5987 form: filename*=charset''percent-encoded-value
    static ref FILENAME_EXT_RE: Regex =
        Regex::new(r"(?i)filename\*\s*=\s*[^']*'[^']*'([^;]+)").unwrap();
    // Plain form: filename="value" or filename=value
    static ref FILENAME_RE: Regex = Regex::new(r#"(?i)filename\s*=\s*"?([^";]+)"?"#).unwrap();
}

pub struct Orchestrator {
    api: ApiClient,
    output_dir: PathBuf,
    decimals: usize,
}

impl Orchestrator {
    pub fn new(api: ApiClient, output_dir: PathBuf, decimals: usize) -> Self {
        Self {
            api,
            output_dir,
            decimals,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run one format lookup: validate, call `/get_formats`, populate the
    /// session catalog. The session returns to Idle on any failure.
    pub async fn lookup(&self, session: &mut Session, url: &str) -> Result<(), ClientError> {
        session.begin_lookup(url)?;
        eprintln!("[lookup] Fetching formats for {}", session.url());

        match self.api.get_formats(session.url()).await {
            Ok(response) => {
                let formats = response.formats.unwrap_or_default();
                let catalog = FormatCatalog::from_descriptors(&formats, self.decimals);
                eprintln!(
                    "[lookup] {} of {} reported formats are renderable",
                    catalog.len(),
                    formats.len()
                );
                session.complete_lookup(response.title, catalog);
                Ok(())
            }
            Err(e) => {
                session.fail_lookup();
                Err(e)
            }
        }
    }

    /// Run one download for the session's current selection and return the
    /// path the payload was saved under. The session phase is restored on
    /// every exit path, so a failed attempt can be retried immediately.
    pub async fn download(&self, session: &mut Session) -> Result<PathBuf, ClientError> {
        let request = session.begin_download()?;
        let result = self.run_download(&request).await;
        session.finish_download();
        result
    }

    async fn run_download(&self, request: &DownloadRequest) -> Result<PathBuf, ClientError> {
        eprintln!("[download] Preparing download...");
        let response = self.api.download(request).await?;

        // Prefer the server-supplied filename when the header carries one
        let filename = filename_from_headers(response.headers())
            .unwrap_or_else(|| request.filename.clone());

        fs::create_dir_all(&self.output_dir).await?;
        let target = self.output_dir.join(&filename);
        let part = self.output_dir.join(format!("{}.part", filename));

        eprintln!("[download] Downloading to {}...", target.display());
        if let Err(e) = write_body(response, &part).await {
            // A partial file is worthless; best effort removal
            let _ = fs::remove_file(&part).await;
            return Err(e);
        }

        fs::rename(&part, &target).await?;
        eprintln!("[download] Saved {}", target.display());
        Ok(target)
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<(), ClientError> {
    let mut file = fs::File::create(path).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// Extract a filename hint from a Content-Disposition style header,
/// decoding any percent-escaping. Path components are stripped so a
/// hostile header cannot steer the write outside the output directory.
pub fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let candidate = if let Some(caps) = FILENAME_EXT_RE.captures(raw) {
        caps.get(1)?.as_str().trim()
    } else {
        FILENAME_RE.captures(raw)?.get(1)?.as_str().trim()
    };

    let decoded = percent_decode_str(candidate)
        .decode_utf8()
        .ok()?
        .into_owned();

    let name = decoded
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(&decoded)
        .trim()
        .to_string();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_DISPOSITION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_quoted_filename() {
        let headers = headers_with(r#"attachment; filename="My Clip.mp4""#);
        assert_eq!(
            filename_from_headers(&headers).as_deref(),
            Some("My Clip.mp4")
        );
    }

    #[test]
    fn test_unquoted_filename() {
        let headers = headers_with("attachment; filename=clip.mp4");
        assert_eq!(filename_from_headers(&headers).as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn test_percent_decoded_filename() {
        let headers = headers_with("attachment; filename=My%20Clip.mp4");
        assert_eq!(
            filename_from_headers(&headers).as_deref(),
            Some("My Clip.mp4")
        );
    }

    #[test]
    fn test_rfc5987_filename() {
        let headers = headers_with("attachment; filename*=UTF-8''v%C3%ADdeo.mp4");
        assert_eq!(
            filename_from_headers(&headers).as_deref(),
            Some("vídeo.mp4")
        );
    }

    #[test]
    fn test_path_components_stripped() {
        let headers = headers_with(r#"attachment; filename="../../etc/clip.mp4""#);
        assert_eq!(filename_from_headers(&headers).as_deref(), Some("clip.mp4"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(filename_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_header_without_filename() {
        let headers = headers_with("inline");
        assert_eq!(filename_from_headers(&headers), None);
    }
}
