// Format catalog - turns raw descriptors into categorized display rows

use super::models::{FormatCategory, FormatDescriptor};
use super::util::format_bytes;

/// One renderable row of the format table. All columns are pre-formatted
/// strings so the view layer is a pure projection.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub format_id: String,
    pub category: FormatCategory,
    pub ext: String,
    /// Resolution, falling back to the format note, then "Audio"/"N/A"
    pub quality: String,
    pub fps: String,
    pub size: String,
    pub vcodec: String,
    pub acodec: String,
    pub tbr: String,
    pub abr: String,
    pub vbr: String,
    pub language: String,
}

/// Categorized rows built from one `/get_formats` response. Rebuilt
/// wholesale on every lookup, so stale rows never accumulate.
#[derive(Debug, Clone, Default)]
pub struct FormatCatalog {
    rows: Vec<CatalogRow>,
}

impl FormatCatalog {
    /// Build rows from remote descriptors, dropping any without an id and
    /// any whose size column cannot be rendered (no `filesize_approx`).
    pub fn from_descriptors(formats: &[FormatDescriptor], decimals: usize) -> Self {
        let rows = formats
            .iter()
            .filter_map(|fmt| build_row(fmt, decimals))
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    /// Row by 0-based display index.
    pub fn get(&self, index: usize) -> Option<&CatalogRow> {
        self.rows.get(index)
    }

    /// Row by descriptor id.
    pub fn find(&self, format_id: &str) -> Option<&CatalogRow> {
        self.rows.iter().find(|row| row.format_id == format_id)
    }

    /// Rows belonging to one table section.
    pub fn section(&self, category: FormatCategory) -> impl Iterator<Item = &CatalogRow> {
        self.rows.iter().filter(move |row| row.category == category)
    }
}

fn build_row(fmt: &FormatDescriptor, decimals: usize) -> Option<CatalogRow> {
    let format_id = fmt.id.clone()?;
    let size = format_bytes(fmt.filesize_approx?, decimals);
    let category = fmt.category();

    let quality = fmt
        .resolution
        .clone()
        .or_else(|| fmt.note.clone())
        .unwrap_or_else(|| {
            if category == FormatCategory::AudioOnly {
                "Audio".to_string()
            } else {
                "N/A".to_string()
            }
        });

    Some(CatalogRow {
        format_id,
        category,
        ext: fmt.ext.clone().unwrap_or_else(|| "N/A".to_string()),
        quality,
        fps: number_column(fmt.fps),
        size,
        vcodec: codec_column(fmt.vcodec.as_deref()),
        acodec: codec_column(fmt.acodec.as_deref()),
        tbr: number_column(fmt.tbr),
        abr: number_column(fmt.abr),
        vbr: number_column(fmt.vbr),
        language: fmt.language.clone().unwrap_or_else(|| "-".to_string()),
    })
}

fn codec_column(codec: Option<&str>) -> String {
    match codec {
        None | Some("none") => "-".to_string(),
        Some(c) => c.to_string(),
    }
}

fn number_column(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}
