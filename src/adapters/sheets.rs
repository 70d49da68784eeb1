use crate::core::leads::LeadSubmission;
use crate::core::LeadSink;
use crate::domain::model::SubmissionReceipt;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A:K";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    #[serde(default = "default_range")]
    pub range: String,
    pub access_token: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_range() -> String {
    DEFAULT_SHEET_RANGE.to_string()
}

fn default_api_base() -> String {
    DEFAULT_SHEETS_API_BASE.to_string()
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            range: default_range(),
            access_token: None,
            api_base: default_api_base(),
        }
    }
}

#[derive(Serialize)]
struct AppendRequest {
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

/// 以 Sheets v4 `values:append` 新增一列；不重試
pub struct GoogleSheetsSink {
    config: SheetsConfig,
    client: Client,
}

impl GoogleSheetsSink {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn append_url(&self, spreadsheet_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|e| EtlError::ConfigError {
            message: format!("Invalid sheets.api_base: {}", e),
        })?;

        url.path_segments_mut()
            .map_err(|_| EtlError::ConfigError {
                message: "sheets.api_base cannot be a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values"])
            .push(&format!("{}:append", self.config.range));

        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }
}

#[async_trait]
impl LeadSink for GoogleSheetsSink {
    fn name(&self) -> &'static str {
        "google-sheets"
    }

    async fn submit(&self, body: &serde_json::Value) -> Result<SubmissionReceipt> {
        let lead = LeadSubmission::from_value(body);
        let spreadsheet_id =
            validate_required_field("sheets.spreadsheet_id", &self.config.spreadsheet_id)?;

        let url = self.append_url(spreadsheet_id)?;
        let payload = AppendRequest {
            values: vec![lead.to_sheet_row(Utc::now())],
        };

        tracing::debug!("Appending lead row to {}", url);
        let mut request = self.client.post(url).json(&payload);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EtlError::SinkError {
                sink: self.name().to_string(),
                message: format!("HTTP {}: {}", status, detail),
            });
        }

        let parsed: AppendResponse = response.json().await?;
        let id = parsed.updates.and_then(|u| u.updated_range);
        tracing::info!("📝 Lead {} appended to spreadsheet", lead.email);

        Ok(SubmissionReceipt {
            sink: self.name().to_string(),
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(server: &MockServer) -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: Some("sheet-123".to_string()),
            access_token: Some("test-token".to_string()),
            api_base: server.base_url(),
            ..SheetsConfig::default()
        }
    }

    #[test]
    fn test_append_url() {
        let sink = GoogleSheetsSink::new(SheetsConfig::default());
        let url = sink.append_url("abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/Sheet1!A:K:append?valueInputOption=USER_ENTERED"
        );
    }

    #[tokio::test]
    async fn test_submit_appends_row() {
        let server = MockServer::start();
        let append_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v4/spreadsheets/sheet-123/values/Sheet1!A:K:append")
                .query_param("valueInputOption", "USER_ENTERED")
                .header("authorization", "Bearer test-token")
                .body_contains("\"+15550100\"")
                .body_contains("\"Compliance Training\"")
                .body_contains("\"RequestAccessForm\"");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"updates": {"updatedRange": "Sheet1!A7:K7"}}));
        });

        let sink = GoogleSheetsSink::new(config_for(&server));
        let receipt = sink
            .submit(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "countryCode": "+1",
                "phoneNumber": "5550100",
                "useCase": "compliance-training",
                "submittedAt": "2025-03-07T14:05:09Z"
            }))
            .await
            .unwrap();

        append_mock.assert();
        assert_eq!(receipt.sink, "google-sheets");
        assert_eq!(receipt.id.as_deref(), Some("Sheet1!A7:K7"));
    }

    #[tokio::test]
    async fn test_submit_accepts_numeric_phone_and_null_name() {
        let server = MockServer::start();
        let append_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v4/spreadsheets/sheet-123/values/Sheet1!A:K:append")
                .body_contains("\"+15550100\"")
                .body_contains("4.5");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"updates": {"updatedRange": "Sheet1!A8:K8"}}));
        });

        let sink = GoogleSheetsSink::new(config_for(&server));
        let receipt = sink
            .submit(&json!({
                "name": null,
                "email": "lead@example.com",
                "countryCode": "+1",
                "phoneNumber": 5550100,
                "rating": 4.5
            }))
            .await
            .unwrap();

        append_mock.assert();
        assert_eq!(receipt.id.as_deref(), Some("Sheet1!A8:K8"));
    }

    #[tokio::test]
    async fn test_submit_surfaces_http_failure() {
        let server = MockServer::start();
        let append_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(403).body("permission denied");
        });

        let sink = GoogleSheetsSink::new(config_for(&server));
        let err = sink.submit(&json!({"name": "Ada"})).await.unwrap_err();

        append_mock.assert();
        match err {
            EtlError::SinkError { message, .. } => assert!(message.contains("403")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_spreadsheet_id() {
        let sink = GoogleSheetsSink::new(SheetsConfig::default());
        let err = sink.submit(&json!({"name": "Ada"})).await.unwrap_err();
        assert!(matches!(err, EtlError::MissingConfigError { .. }));
    }
}
