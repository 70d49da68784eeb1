pub mod campaign;
pub mod csv_parser;
pub mod etl;
pub mod leads;
pub mod pipeline;
pub mod uploader;

pub use crate::domain::model::{ProspectRecord, ProspectTable, TransformResult};
pub use crate::domain::ports::{ConfigProvider, LeadSink, Pipeline, Storage};
pub use crate::utils::error::Result;
