pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod interfaces;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::server_config::ServerConfig;
pub use core::campaign::{CampaignSession, WizardStep};
pub use core::csv_parser::{parse_prospect_table, parse_prospects, ParseMode};
pub use core::uploader::ProspectUploader;
pub use core::{etl::EtlEngine, pipeline::ProspectPipeline};
pub use domain::model::{ProspectRecord, ProspectTable, UploadedFile};
pub use utils::error::{EtlError, Result};
