use super::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// 记录来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Remote,
    StaticFile,
    Embedded,
}

/// 一次加载的结果, 加载后只读, 可在请求间共享
#[derive(Debug, Clone, Serialize)]
pub struct RecordSet {
    pub origin: RecordOrigin,
    pub loaded_at: DateTime<Utc>,
    pub records: Arc<[Record]>,
}

impl RecordSet {
    pub fn new(origin: RecordOrigin, records: Vec<Record>) -> Self {
        Self {
            origin,
            loaded_at: Utc::now(),
            records: records.into(),
        }
    }

    /// 是否处于示例数据 (降级) 模式
    pub fn is_sample(&self) -> bool {
        self.origin == RecordOrigin::Embedded
    }

    /// 搜索框占位提示
    pub fn placeholder(&self) -> &'static str {
        if self.is_sample() {
            "Search (using sample data)"
        } else {
            "Search..."
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// 按发票号在已加载记录中查找 (精确匹配)
    pub fn find(&self, invoice_number: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.invoice_number().as_deref() == Some(invoice_number))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
