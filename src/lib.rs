pub mod api;
pub mod config;
pub mod models;
pub mod service;
pub mod source;

pub use config::AppConfig;
pub use models::{Location, Record, RecordSet, SearchCategory, SearchSelector, Suggestion};
pub use service::{filter_suggestions, DetailResolver, Navigator, SearchSession};
pub use source::{create_http_client, GraphQlClient, RecordStore};
