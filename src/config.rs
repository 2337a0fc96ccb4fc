use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 静态 JSON 文件的默认候选路径, 按顺序尝试
pub const DEFAULT_STATIC_PATHS: [&str; 3] = [
    "./Json/Invoice.json",
    "Json/Invoice.json",
    "public/Json/Invoice.json",
];

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// 托管 GraphQL 接口; 未配置 endpoint 时跳过远程数据源
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub key: Option<String>,
}

// key 不进日志
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("key", &self.key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 文件路径或 http(s) URL
    pub static_paths: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            static_paths: DEFAULT_STATIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 < ar-search.toml (可选) < 环境变量
    ///
    /// 环境变量以 `AR__` 为前缀, `__` 分隔层级, 例如 `AR__SERVER__PORT`,
    /// `AR__API__ENDPOINT`, `AR__DATA__STATIC_PATHS=a.json,b.json`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Some("ar-search"))
    }

    pub fn load_from(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix("AR")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("data.static_paths")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
