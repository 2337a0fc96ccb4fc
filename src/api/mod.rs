pub mod error;
pub mod handlers;

pub use error::AppError;
pub use handlers::*;

use crate::models::RecordSet;
use crate::source::InvoiceLookup;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 共享状态: 启动时加载的记录 + 可选的远程单条查询
#[derive(Clone)]
pub struct AppState {
    pub records: RecordSet,
    pub lookup: Option<Arc<dyn InvoiceLookup>>,
}

impl AppState {
    pub fn new(records: RecordSet, lookup: Option<Arc<dyn InvoiceLookup>>) -> Self {
        Self { records, lookup }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/search/options", get(search_options))
        .route("/api/search", get(search))
        .route("/api/search/select", post(select))
        .route("/api/invoice", get(invoice_detail))
        .route("/api/invoices", get(list_invoices))
        .layer(ServiceBuilder::new())
        .with_state(state)
}
