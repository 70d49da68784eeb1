//! 申請試用表單：欄位定義、代碼轉標籤、試算表列的組成。

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

pub const LEAD_STATUS_NEW: &str = "New";
pub const FORM_SOURCE: &str = "RequestAccessForm";

/// 表單欄位照原樣從 JSON 讀取：數字、布林會轉成字串，`null` 或缺欄視為空字串，
/// `rating` 與 `feedback` 不轉型直接寫入試算表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone_number: String,
    pub use_case: String,
    pub timeline: String,
    pub audience_size: String,
    pub rating: Value,
    pub feedback: Value,
    pub submitted_at: Value,
}

pub fn use_case_label(code: &str) -> &str {
    match code {
        "corporate-training" => "Corporate Training & Development",
        "higher-education" => "Higher Education",
        "k12-education" => "K-12 Education",
        "compliance-training" => "Compliance Training",
        "professional-development" => "Professional Development",
        "customer-education" => "Customer Education & Onboarding",
        other => other,
    }
}

pub fn timeline_label(code: &str) -> &str {
    match code {
        "immediate" => "As soon as possible (within 1 week)",
        "soon" => "Within 2-4 weeks",
        "quarter" => "This quarter (within 3 months)",
        "year" => "This year",
        "exploring" => "Just exploring options",
        other => other,
    }
}

pub fn audience_size_label(code: &str) -> &str {
    match code {
        "1-50" => "1-50 learners",
        "51-200" => "51-200 learners",
        "201-1000" => "201-1,000 learners",
        "1001-5000" => "1,001-5,000 learners",
        "5000+" => "5,000+ learners",
        other => other,
    }
}

/// `submitted_at` 可為 RFC 3339 字串或毫秒 epoch；無法解析時改用伺服器時間
pub fn submission_time(submitted_at: &Value, now: DateTime<Utc>) -> DateTime<Utc> {
    let parsed = match submitted_at {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed.unwrap_or(now)
}

fn text_field(body: &Value, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn value_or(body: &Value, key: &str, fallback: Value) -> Value {
    match body.get(key) {
        Some(value) if !is_falsy(value) => value.clone(),
        _ => fallback,
    }
}

/// 例：`03/07/2025, 02:05:09 PM`（UTC）
pub fn format_sheet_timestamp(at: DateTime<Utc>) -> String {
    at.format("%m/%d/%Y, %I:%M:%S %p").to_string()
}

impl LeadSubmission {
    pub fn from_value(body: &Value) -> Self {
        Self {
            name: text_field(body, "name"),
            email: text_field(body, "email"),
            country_code: text_field(body, "countryCode"),
            phone_number: text_field(body, "phoneNumber"),
            use_case: text_field(body, "useCase"),
            timeline: text_field(body, "timeline"),
            audience_size: text_field(body, "audienceSize"),
            rating: value_or(body, "rating", json!(0)),
            feedback: value_or(body, "feedback", json!("")),
            submitted_at: body.get("submittedAt").cloned().unwrap_or_default(),
        }
    }

    pub fn full_phone_number(&self) -> String {
        format!("{}{}", self.country_code, self.phone_number)
    }

    /// 試算表 A–K 欄
    pub fn to_sheet_row(&self, now: DateTime<Utc>) -> Vec<Value> {
        let submitted = submission_time(&self.submitted_at, now);

        vec![
            json!(self.name),
            json!(self.email),
            json!(self.full_phone_number()),
            json!(use_case_label(&self.use_case)),
            json!(timeline_label(&self.timeline)),
            json!(audience_size_label(&self.audience_size)),
            self.rating.clone(),
            self.feedback.clone(),
            json!(format_sheet_timestamp(submitted)),
            json!(LEAD_STATUS_NEW),
            json!(FORM_SOURCE),
        ]
    }
}
