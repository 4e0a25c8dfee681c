// Session state for one lookup -> select -> download cycle

use super::catalog::{CatalogRow, FormatCatalog};
use super::errors::ClientError;
use super::models::DownloadRequest;
use super::selection::SelectionState;
use super::util::build_filename;
use super::validator::{is_valid_video_url, validate_video_url};

/// Lifecycle phase of the current action. Validation is synchronous, so
/// it never appears as an observable phase of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing fetched yet, or the last lookup failed
    #[default]
    Idle,
    /// A `/get_formats` call is in flight
    Fetching,
    /// Formats are populated; selection and download are possible
    Ready,
    /// A `/download` call is in flight
    Downloading,
}

impl Phase {
    fn is_busy(&self) -> bool {
        matches!(self, Self::Fetching | Self::Downloading)
    }
}

/// Explicit session state replacing the original's page-global variables.
/// Reset at the start of every new lookup; nothing survives the process.
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    url: String,
    title: String,
    catalog: FormatCatalog,
    selection: SelectionState,
}

impl Session {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Start a new lookup. A trigger while another action is in flight is
    /// rejected outright rather than queued; invalid input never gets as
    /// far as the network.
    pub fn begin_lookup(&mut self, url: &str) -> Result<(), ClientError> {
        if self.phase.is_busy() {
            return Err(ClientError::Busy("lookup"));
        }
        validate_video_url(url)?;

        self.url = url.trim().to_string();
        self.title.clear();
        self.catalog = FormatCatalog::default();
        self.selection.clear();
        self.phase = Phase::Fetching;
        Ok(())
    }

    pub fn complete_lookup(&mut self, title: Option<String>, catalog: FormatCatalog) {
        self.title = title.unwrap_or_else(|| "Untitled Video".to_string());
        self.catalog = catalog;
        self.phase = Phase::Ready;
    }

    pub fn fail_lookup(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Toggle the selection control of a row by 0-based display index.
    /// Returns the row so the caller can echo what changed.
    pub fn toggle_index(&mut self, index: usize) -> Option<&CatalogRow> {
        let (category, format_id) = {
            let row = self.catalog.get(index)?;
            (row.category, row.format_id.clone())
        };
        self.selection.toggle(category, &format_id);
        self.catalog.get(index)
    }

    /// Toggle the selection control of a row by descriptor id.
    pub fn toggle_id(&mut self, format_id: &str) -> Result<(), ClientError> {
        let category = self
            .catalog
            .find(format_id)
            .map(|row| row.category)
            .ok_or_else(|| ClientError::UnknownFormat(format_id.to_string()))?;
        self.selection.toggle(category, format_id);
        Ok(())
    }

    /// Derive the download request from the current selection. The format
    /// identifier is computed here, at download time, so it can never go
    /// stale. Enters `Downloading` on success.
    pub fn begin_download(&mut self) -> Result<DownloadRequest, ClientError> {
        if self.phase.is_busy() {
            return Err(ClientError::Busy("download"));
        }
        // Stale-state check: the stored URL was validated at lookup time,
        // but a download with no prior successful lookup must not proceed.
        if self.url.is_empty() || !is_valid_video_url(&self.url) {
            return Err(ClientError::EmptyUrl);
        }
        let format_id = self.selection.format_id().ok_or(ClientError::NoSelection)?;
        let filename = build_filename(&self.title, self.selection.suggested_extension());

        self.phase = Phase::Downloading;
        Ok(DownloadRequest {
            url: self.url.clone(),
            format_id,
            filename,
        })
    }

    /// Always called when a download attempt ends, success or failure, so
    /// the session can accept the next trigger. The url, title and
    /// selection survive untouched.
    pub fn finish_download(&mut self) {
        self.phase = Phase::Ready;
    }
}
