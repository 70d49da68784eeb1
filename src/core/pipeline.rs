use crate::core::csv_parser::parse_prospect_table;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{ProspectTable, TransformResult, STATUS_KEY};
use crate::utils::error::{EtlError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ARCHIVE_NAME: &str = "prospects.zip";

/// 讀取名單 CSV，輸出 CSV/TSV/JSON 並打包成 zip
pub struct ProspectPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ProspectPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }
}

/// 輸出欄位：去重後的表頭，最後接 `status`
fn output_columns(table: &ProspectTable) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(table.headers.len() + 1);
    for header in &table.headers {
        if !columns.contains(header) {
            columns.push(header.clone());
        }
    }
    if !columns.iter().any(|c| c == STATUS_KEY) {
        columns.push(STATUS_KEY.to_string());
    }
    columns
}

fn render_delimited(table: &ProspectTable, columns: &[String], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for record in &table.records {
        writer.write_record(columns.iter().map(|c| record.get(c).unwrap_or_default()))?;
    }

    let bytes = writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("Failed to flush delimited output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("Delimited output is not UTF-8: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProspectPipeline<S, C> {
    async fn extract(&self) -> Result<ProspectTable> {
        let input = self.config.input_file();
        tracing::debug!("Reading prospect file: {}", input);

        let bytes = self.storage.read_file(input).await?;
        let text = String::from_utf8_lossy(&bytes);
        let table = parse_prospect_table(&text, self.config.parse_mode())?;

        if table.records.is_empty() {
            tracing::warn!("⚠️ {} has a header row but no prospects", input);
        }

        Ok(table)
    }

    async fn transform(&self, table: ProspectTable) -> Result<TransformResult> {
        let columns = output_columns(&table);
        tracing::debug!("Rendering {} rows with columns {:?}", table.records.len(), columns);

        let csv_output = render_delimited(&table, &columns, b',')?;
        let tsv_output = render_delimited(&table, &columns, b'\t')?;
        let json_output = serde_json::to_string_pretty(&table.records)?;

        Ok(TransformResult {
            table,
            csv_output,
            tsv_output,
            json_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), ARCHIVE_NAME);

        let entries = [
            ("csv", "prospects.csv", &result.csv_output),
            ("tsv", "prospects.tsv", &result.tsv_output),
            ("json", "prospects.json", &result.json_output),
        ];

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for (format, file_name, content) in entries {
                if self.wants(format) {
                    zip.start_file::<_, ()>(file_name, FileOptions::default())?;
                    zip.write_all(content.as_bytes())?;
                }
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ARCHIVE_NAME, &zip_data).await?;

        Ok(output_path)
    }
}
