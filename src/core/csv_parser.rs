//! 名單 CSV 解析與正規化。
//!
//! 第一行一律視為表頭；之後每個非空白行產生一筆 [`ProspectRecord`]，
//! 欄位不足補空字串、多出的欄位丟棄，最後加上 `status = "Data fetched"`。
//! 預設的 [`ParseMode::Lenient`] 只以 `,` 切分，欄位內的逗號會被當成分隔符；
//! 需要引號欄位時改用 [`ParseMode::Strict`]。

pub use crate::domain::model::ParseMode;
use crate::domain::model::{ProspectRecord, ProspectTable, STATUS_FETCHED, STATUS_KEY};
use crate::utils::error::{EtlError, Result};
use indexmap::IndexMap;

/// 以預設模式解析，只回傳記錄
pub fn parse_prospects(text: &str) -> Result<Vec<ProspectRecord>> {
    parse_prospect_table(text, ParseMode::Lenient).map(|table| table.records)
}

pub fn parse_prospect_table(text: &str, mode: ParseMode) -> Result<ProspectTable> {
    if text.is_empty() {
        return Err(EtlError::EmptyFile);
    }

    let table = match mode {
        ParseMode::Lenient => parse_lenient(text),
        ParseMode::Strict => parse_strict(text)?,
    };

    tracing::debug!(
        "Parsed {} prospect rows with {} columns ({:?} mode)",
        table.records.len(),
        table.headers.len(),
        mode
    );

    Ok(table)
}

fn parse_lenient(text: &str) -> ProspectTable {
    let mut lines = text.split('\n');

    // split 至少會產生一個元素
    let headers: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|header| header.trim().to_string())
        .collect();

    let records = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| build_record(&headers, line.split(',')))
        .collect();

    ProspectTable { headers, records }
}

fn parse_strict(text: &str) -> Result<ProspectTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        // 只略過空白行；`,` 這類全空欄位的列仍是一筆資料
        if is_blank_line(&row) {
            continue;
        }

        match &headers {
            None => {
                headers = Some(row.iter().map(|h| h.trim().to_string()).collect());
            }
            Some(headers) => records.push(build_record(headers, row.iter())),
        }
    }

    Ok(ProspectTable {
        headers: headers.unwrap_or_default(),
        records,
    })
}

fn is_blank_line(row: &csv::StringRecord) -> bool {
    row.len() == 1 && row.get(0).is_some_and(|field| field.trim().is_empty())
}

/// 依表頭位置取值；重複的表頭以最後一欄為準但保留第一次出現的位置
fn build_record<'a, I>(headers: &[String], fields: I) -> ProspectRecord
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = fields.into_iter();
    let mut data = IndexMap::with_capacity(headers.len() + 1);

    for header in headers {
        let value = fields.next().map(str::trim).unwrap_or_default();
        data.insert(header.clone(), value.to_string());
    }

    data.insert(STATUS_KEY.to_string(), STATUS_FETCHED.to_string());
    ProspectRecord { data }
}
