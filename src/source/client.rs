use super::error::SourceError;
use crate::config::ApiConfig;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;

/// 创建共享 HTTP 客户端 (远程接口与静态文件共用)
pub fn create_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("ar-search/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// 托管 GraphQL 接口客户端, 由应用根创建后注入数据源
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// 从配置创建; 未配置 endpoint 时返回 None
    pub fn from_config(http: reqwest::Client, config: &ApiConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_deref().filter(|e| !e.trim().is_empty())?;
        Some(Self::new(http, endpoint, config.key.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 执行查询, 返回 `data` 节点
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value, SourceError> {
        let start = Instant::now();
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                location: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let body: GraphQlResponse = serde_json::from_slice(&bytes)?;
        tracing::debug!("GraphQL 请求完成, 耗时: {:?}", start.elapsed());

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(SourceError::GraphQl(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| SourceError::Shape("response carried no data".to_string()))
    }
}
