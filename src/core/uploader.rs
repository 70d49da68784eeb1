use crate::core::csv_parser::{parse_prospect_table, ParseMode};
use crate::domain::model::{ProspectRecord, ProspectTable, UploadedFile, STATUS_KEY};
use crate::utils::error::{EtlError, Result};

const CSV_CONTENT_TYPE: &str = "text/csv";

/// 名單上傳區：持有最近一次成功解析的結果與最近一次錯誤。
///
/// 每次上傳都是同步完成，新的結果直接覆蓋舊的（last write wins），
/// 因此不需要取消進行中的解析。
#[derive(Debug, Default)]
pub struct ProspectUploader {
    mode: ParseMode,
    table: ProspectTable,
    upload_error: Option<String>,
}

impl ProspectUploader {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// 處理拖放或選取的檔案；失敗時保留先前的名單
    pub fn upload(&mut self, file: &UploadedFile) -> Result<usize> {
        match self.try_upload(file) {
            Ok(table) => {
                let count = table.records.len();
                tracing::info!("📥 Loaded {} prospects from {}", count, file.name);
                self.table = table;
                self.upload_error = None;
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Upload of {} rejected: {}", file.name, e);
                self.upload_error = Some(e.user_friendly_message());
                Err(e)
            }
        }
    }

    fn try_upload(&self, file: &UploadedFile) -> Result<ProspectTable> {
        if !is_csv(file) {
            return Err(EtlError::UnsupportedFileType {
                file_name: file.name.clone(),
            });
        }

        let text = String::from_utf8_lossy(&file.contents);
        parse_prospect_table(&text, self.mode)
    }

    pub fn prospects(&self) -> &[ProspectRecord] {
        &self.table.records
    }

    pub fn error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    pub fn can_proceed(&self) -> bool {
        !self.table.records.is_empty()
    }

    /// 表格欄名，不含 `status`
    pub fn table_headers(&self) -> Vec<&str> {
        match self.table.records.first() {
            Some(first) => first.keys().filter(|key| *key != STATUS_KEY).collect(),
            None => self
                .table
                .headers
                .iter()
                .map(String::as_str)
                .filter(|key| *key != STATUS_KEY)
                .collect(),
        }
    }

    pub fn table_rows(&self) -> Vec<Vec<&str>> {
        self.table
            .records
            .iter()
            .map(|record| {
                record
                    .data
                    .iter()
                    .filter(|(key, _)| key.as_str() != STATUS_KEY)
                    .map(|(_, value)| value.as_str())
                    .collect()
            })
            .collect()
    }
}

fn is_csv(file: &UploadedFile) -> bool {
    match file.content_type.as_deref() {
        Some(content_type) => content_type
            .split(';')
            .next()
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(CSV_CONTENT_TYPE)),
        None => file.name.to_ascii_lowercase().ends_with(".csv"),
    }
}
