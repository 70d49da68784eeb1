// Adapters layer: concrete lead sinks for external systems.

pub mod document_store;
pub mod sheets;

pub use document_store::{DocumentStoreConfig, JsonlDocumentStore};
pub use sheets::{GoogleSheetsSink, SheetsConfig};
