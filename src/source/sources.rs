use super::client::GraphQlClient;
use super::error::SourceError;
use super::queries;
use crate::models::{LineItem, Record, RecordOrigin};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// 记录数据源, 加载链中的一环
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// 日志中的来源名
    fn name(&self) -> &str;

    fn origin(&self) -> RecordOrigin;

    async fn fetch(&self) -> Result<Vec<Record>, SourceError>;
}

/// 单条发票查询 (详情页)
#[async_trait]
pub trait InvoiceLookup: Send + Sync {
    async fn get_invoice(&self, invoice_number: &str) -> Result<Option<Record>, SourceError>;

    async fn line_items(&self, invoice_number: &str) -> Result<Vec<LineItem>, SourceError>;
}

#[async_trait]
impl InvoiceLookup for GraphQlClient {
    async fn get_invoice(&self, invoice_number: &str) -> Result<Option<Record>, SourceError> {
        queries::get_invoice(self, invoice_number).await
    }

    async fn line_items(&self, invoice_number: &str) -> Result<Vec<LineItem>, SourceError> {
        queries::list_line_items(self, invoice_number).await
    }
}

/// 远程 GraphQL 列表查询
pub struct RemoteSource {
    client: Arc<GraphQlClient>,
}

impl RemoteSource {
    pub fn new(client: Arc<GraphQlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordSource for RemoteSource {
    fn name(&self) -> &str {
        self.client.endpoint()
    }

    fn origin(&self) -> RecordOrigin {
        RecordOrigin::Remote
    }

    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        queries::list_invoices(&self.client).await
    }
}

/// 静态 JSON 文件, 依次尝试候选位置, 第一个成功读取并解析的位置生效
///
/// 候选位置以 `http://` 或 `https://` 开头时通过 HTTP 获取, 否则按本地路径读取.
pub struct StaticFileSource {
    http: reqwest::Client,
    candidates: Vec<String>,
}

impl StaticFileSource {
    pub fn new(http: reqwest::Client, candidates: Vec<String>) -> Self {
        Self { http, candidates }
    }

    async fn read(&self, location: &str) -> Result<Value, SourceError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let response = self.http.get(location).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::Status {
                    location: location.to_string(),
                    status: status.as_u16(),
                });
            }
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let bytes = tokio::fs::read(location).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}

#[async_trait]
impl RecordSource for StaticFileSource {
    fn name(&self) -> &str {
        "static file"
    }

    fn origin(&self) -> RecordOrigin {
        RecordOrigin::StaticFile
    }

    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let mut last_error = None;

        for location in &self.candidates {
            tracing::debug!("尝试读取静态文件 {}", location);
            match self.read(location).await {
                Ok(value) => {
                    let records = queries::decode_records(&value)?;
                    tracing::info!("从 {} 读取 {} 条记录", location, records.len());
                    return Ok(records);
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!("{} 不存在", location);
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::warn!("读取 {} 失败: {}", location, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| SourceError::Empty(self.name().to_string())))
    }
}
