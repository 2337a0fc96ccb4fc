use thiserror::Error;

/// 数据源失败; 在加载链中均视为可恢复, 记录日志后尝试下一个来源
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{location} returned HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    Shape(String),

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("{0} returned no records")]
    Empty(String),
}

impl SourceError {
    /// 404 / 文件不存在
    pub fn is_not_found(&self) -> bool {
        match self {
            SourceError::Status { status, .. } => *status == 404,
            SourceError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
