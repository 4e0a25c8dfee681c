// Client module - everything needed to talk to the extraction service

pub mod api;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod selection;
pub mod session;
pub mod util;
pub mod validator;

pub use api::{ApiClient, ApiConfig};
pub use catalog::{CatalogRow, FormatCatalog};
pub use errors::ClientError;
pub use models::{DownloadRequest, FormatCategory, FormatDescriptor, FormatsResponse};
pub use orchestrator::Orchestrator;
pub use selection::SelectionState;
pub use session::{Phase, Session};
