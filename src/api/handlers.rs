use super::error::AppError;
use super::AppState;
use crate::models::{
    Location, RecordSet, SearchCategory, SearchSelector, Suggestion, INVOICE_PATH,
};
use crate::service::{filter_suggestions, DetailResolver, DetailView, Navigator, SearchSession};
use axum::extract::{Json, Query, RawQuery, State};
use serde::{Deserialize, Serialize};

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
}

/// 搜索响应体
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub category: SearchCategory,
    pub suggestions: Vec<Suggestion>,
    pub placeholder: &'static str,
    pub sample_data: bool,
}

/// 请求体: 选中的联想项, 附带选中前的搜索栏状态
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub value: String,
    /// 选中时所在位置, 缺省为根路径
    #[serde(default)]
    pub from: Option<String>,
    /// 选中前的输入
    #[serde(default)]
    pub query: String,
    pub category: Option<String>,
}

/// 选中后的状态: 新位置 + 清空的输入与联想列表
#[derive(Debug, Serialize)]
pub struct SelectResponse {
    pub location: Location,
    pub category: SearchCategory,
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    /// 导航历史长度 (起始位置 + 本次跳转)
    pub history_len: usize,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 搜索范围选项
pub async fn search_options() -> Json<Vec<SearchSelector>> {
    Json(SearchSelector::options())
}

/// 联想搜索
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let category = parse_category(params.category.as_deref())?;
    let suggestions = filter_suggestions(&params.q, category, state.records.records());

    Ok(Json(SearchResponse {
        category,
        suggestions,
        placeholder: state.records.placeholder(),
        sample_data: state.records.is_sample(),
    }))
}

/// 选中联想项, 返回详情页位置
pub async fn select(
    State(state): State<AppState>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<SelectResponse>, AppError> {
    if req.value.trim().is_empty() {
        return Err(AppError::MissingValue);
    }

    let category = parse_category(req.category.as_deref())?;
    let start = req.from.as_deref().map(Location::parse).unwrap_or_default();
    let mut navigator = Navigator::new(start);

    let mut session = SearchSession::new(state.records.clone(), SearchSelector::new(category));
    session.set_query(req.query);
    let location = session.select(&req.value, &mut navigator);

    Ok(Json(SelectResponse {
        location,
        category: session.selector().value,
        query: session.query().to_string(),
        suggestions: session.suggestions().to_vec(),
        history_len: navigator.history_len(),
    }))
}

/// 缺省或空串为 all
fn parse_category(raw: Option<&str>) -> Result<SearchCategory, AppError> {
    match raw {
        Some(raw) if !raw.is_empty() => Ok(raw.parse::<SearchCategory>()?),
        _ => Ok(SearchCategory::All),
    }
}

/// 发票详情: 参数缺失或查无此票时回退到第一条记录
pub async fn invoice_detail(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Json<DetailView> {
    let location = match query {
        Some(query) => Location::parse(&format!("{}?{}", INVOICE_PATH, query)),
        None => Location::new(INVOICE_PATH),
    };

    let mut navigator = Navigator::new(location);
    let resolver = DetailResolver::new(state.records.clone(), state.lookup.clone());
    Json(resolver.resolve(&mut navigator).await)
}

/// 已加载的全部发票 (含来源与加载时间)
pub async fn list_invoices(State(state): State<AppState>) -> Json<RecordSet> {
    Json(state.records.clone())
}
