//! 表單收件與名單解析的 HTTP 端點。

use crate::adapters::{GoogleSheetsSink, JsonlDocumentStore};
use crate::config::cli::LocalStorage;
use crate::config::server_config::ServerConfig;
use crate::core::csv_parser::parse_prospect_table;
use crate::core::LeadSink;
use crate::domain::model::ParseMode;
use crate::utils::error::EtlError;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// `/api/prospects/parse` 的上傳上限；actix 預設只收 256 KiB
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct LeadState {
    pub sheets: Arc<dyn LeadSink>,
    pub documents: Arc<dyn LeadSink>,
}

impl LeadState {
    pub fn from_config(config: &ServerConfig) -> Self {
        let storage = LocalStorage::new(config.documents.path.clone());
        Self {
            sheets: Arc::new(GoogleSheetsSink::new(config.sheets.clone())),
            documents: Arc::new(JsonlDocumentStore::new(
                storage,
                config.documents.filename.clone(),
            )),
        }
    }
}

#[derive(Serialize)]
struct FormAccepted {
    success: bool,
    message: &'static str,
}

#[derive(Serialize)]
struct DocumentCreated {
    success: bool,
    id: Option<String>,
}

#[derive(Serialize)]
struct Failure {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParseQuery {
    #[serde(default)]
    pub strict: bool,
}

fn submission_failed(sink: &str, e: &EtlError) -> HttpResponse {
    tracing::error!(
        "❌ Error submitting form to {}: {} (Category: {:?})",
        sink,
        e,
        e.category()
    );
    HttpResponse::InternalServerError().json(Failure {
        success: false,
        error: "Failed to submit form".to_string(),
        details: Some(e.to_string()),
    })
}

#[post("/api/submit-form")]
async fn submit_form(state: web::Data<LeadState>, body: web::Json<Value>) -> impl Responder {
    match state.sheets.submit(&body).await {
        Ok(_) => HttpResponse::Ok().json(FormAccepted {
            success: true,
            message: "Form submitted successfully",
        }),
        Err(e) => submission_failed(state.sheets.name(), &e),
    }
}

#[post("/api/submissions")]
async fn store_submission(state: web::Data<LeadState>, body: web::Json<Value>) -> impl Responder {
    match state.documents.submit(&body).await {
        Ok(receipt) => HttpResponse::Created().json(DocumentCreated {
            success: true,
            id: receipt.id,
        }),
        Err(e) => submission_failed(state.documents.name(), &e),
    }
}

#[post("/api/prospects/parse")]
async fn parse_prospects(query: web::Query<ParseQuery>, body: String) -> impl Responder {
    let mode = if query.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    match parse_prospect_table(&body, mode) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e @ (EtlError::EmptyFile | EtlError::CsvError(_))) => {
            HttpResponse::BadRequest().json(Failure {
                success: false,
                error: e.user_friendly_message(),
                details: None,
            })
        }
        Err(e) => HttpResponse::InternalServerError().json(Failure {
            success: false,
            error: "Error processing file".to_string(),
            details: Some(e.to_string()),
        }),
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
        .service(health)
        .service(submit_form)
        .service(store_submission)
        .service(parse_prospects);
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(LeadState::from_config(&config));
    let (host, port) = config.bind_address();

    tracing::info!("🌐 Lead server listening on {}:{}", host, port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((host, port))?
        .run()
        .await
}
