use crate::core::{LeadSink, Storage};
use crate::domain::model::SubmissionReceipt;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

pub const DEFAULT_SUBMISSIONS_FILE: &str = "submissions.jsonl";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_path() -> String {
    "./data".to_string()
}

fn default_filename() -> String {
    DEFAULT_SUBMISSIONS_FILE.to_string()
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            filename: default_filename(),
        }
    }
}

/// 每筆送出附加成一行 JSON；mutex 確保同一行不會交錯寫入
pub struct JsonlDocumentStore<S: Storage> {
    storage: S,
    filename: String,
    write_lock: Mutex<()>,
}

impl<S: Storage> JsonlDocumentStore<S> {
    pub fn new(storage: S, filename: impl Into<String>) -> Self {
        Self {
            storage,
            filename: filename.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_existing(&self) -> Result<Vec<u8>> {
        match self.storage.read_file(&self.filename).await {
            Ok(bytes) => Ok(bytes),
            Err(EtlError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// 讀出所有文件（測試與管理用）
    pub async fn documents(&self) -> Result<Vec<Value>> {
        let bytes = self.read_existing().await?;
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(EtlError::from))
            .collect()
    }
}

/// 原始內容原樣保留，另加 `_id` 與伺服器時間 `createdAt`
fn build_document(body: &Value, id: &str) -> Value {
    let mut document = match body {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert("payload".to_string(), other.clone());
            map
        }
    };
    document.insert("_id".to_string(), Value::String(id.to_string()));
    document.insert(
        "createdAt".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    Value::Object(document)
}

#[async_trait]
impl<S: Storage> LeadSink for JsonlDocumentStore<S> {
    fn name(&self) -> &'static str {
        "document-store"
    }

    async fn submit(&self, body: &Value) -> Result<SubmissionReceipt> {
        let id = uuid::Uuid::new_v4().to_string();
        let document = build_document(body, &id);
        let mut line = serde_json::to_vec(&document)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        self.storage.append_file(&self.filename, &line).await?;

        tracing::info!("🗂️ Stored submission {} in {}", id, self.filename);
        Ok(SubmissionReceipt {
            sink: self.name().to_string(),
            id: Some(id),
        })
    }
}
