use crate::domain::model::{ParseMode, ProspectTable, SubmissionReceipt, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 附加在檔尾，檔案不存在時建立
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn parse_mode(&self) -> ParseMode;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ProspectTable>;
    async fn transform(&self, table: ProspectTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}

/// 表單送出的目的地（試算表、文件庫）
#[async_trait]
pub trait LeadSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn submit(&self, body: &serde_json::Value) -> Result<SubmissionReceipt>;
}
