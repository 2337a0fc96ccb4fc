use super::client::GraphQlClient;
use super::embedded;
use super::sources::{RecordSource, RemoteSource, StaticFileSource};
use crate::config::AppConfig;
use crate::models::{Record, RecordOrigin, RecordSet};
use std::sync::Arc;
use std::time::Instant;

/// 记录加载器: 按优先级依次尝试数据源, 第一个返回非空结果的来源生效
///
/// 数据源串行等待, 不并发. 全部失败时返回内置示例数据, 不向上抛错.
pub struct RecordStore {
    sources: Vec<Box<dyn RecordSource>>,
    fallback: Vec<Record>,
}

impl RecordStore {
    /// 空加载链, 只剩内置示例数据
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            fallback: embedded::sample_records(),
        }
    }

    /// 默认加载链: 远程接口 (如已配置) -> 静态文件 -> 内置示例
    pub fn from_config(
        config: &AppConfig,
        http: reqwest::Client,
        client: Option<Arc<GraphQlClient>>,
    ) -> Self {
        let mut store = Self::new();
        if let Some(client) = client {
            store = store.with_source(RemoteSource::new(client));
        }
        store.with_source(StaticFileSource::new(http, config.data.static_paths.clone()))
    }

    pub fn with_source(mut self, source: impl RecordSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// 替换兜底数据
    pub fn with_fallback(mut self, fallback: Vec<Record>) -> Self {
        self.fallback = fallback;
        self
    }

    /// 加载记录
    pub async fn load(&self) -> RecordSet {
        for (idx, source) in self.sources.iter().enumerate() {
            let remaining = self.sources.len() - idx - 1;
            let start = Instant::now();

            match source.fetch().await {
                Ok(records) if !records.is_empty() => {
                    tracing::info!(
                        "✓ 从 {} 加载 {} 条记录, 耗时: {:?}",
                        source.name(),
                        records.len(),
                        start.elapsed()
                    );
                    return RecordSet::new(source.origin(), records);
                }
                Ok(_) => {
                    tracing::warn!(
                        "✗ {} 返回空结果, 剩余数据源 {}",
                        source.name(),
                        remaining
                    );
                }
                Err(e) => {
                    tracing::warn!("✗ {} 加载失败: {}, 剩余数据源 {}", source.name(), e, remaining);
                }
            }
        }

        tracing::warn!("所有数据源均不可用, 使用内置示例数据 ({} 条)", self.fallback.len());
        RecordSet::new(RecordOrigin::Embedded, self.fallback.clone())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
