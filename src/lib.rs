pub mod client;

pub use client::{
    ApiClient, ApiConfig, ClientError, DownloadRequest, FormatCatalog, FormatCategory,
    FormatDescriptor, Orchestrator, SelectionState, Session,
};
