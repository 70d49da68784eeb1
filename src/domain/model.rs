use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 成功解析後附加到每筆記錄的狀態值
pub const STATUS_KEY: &str = "status";
pub const STATUS_FETCHED: &str = "Data fetched";

/// 分欄方式：`Lenient` 直接以逗號切分（不處理引號），`Strict` 依 RFC 4180 解析引號欄位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    #[default]
    Lenient,
    Strict,
}

/// 一筆名單資料：欄位名稱 → 字串值，保留表頭順序供顯示
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProspectRecord {
    pub data: IndexMap<String, String>,
}

impl ProspectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.get(STATUS_KEY)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 表頭加上資料列；沒有資料列時仍可顯示欄名
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectTable {
    pub headers: Vec<String>,
    pub records: Vec<ProspectRecord>,
}

/// 上傳的檔案內容，`content_type` 由瀏覽器或呼叫端提供
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub contents: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: Option<&str>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_string),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: ProspectTable,
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
}

/// 寫入表單目的地後的回執
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub sink: String,
    pub id: Option<String>,
}
