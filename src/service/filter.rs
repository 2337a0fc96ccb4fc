use crate::models::record::{
    COUNTRY, CURRENCY, INVOICE_DATE, INVOICE_NUMBER, NAME, ORDER_NUMBER, ORIGINAL_AMOUNT,
    STATEMENT_NUMBER, STATEMENT_TYPE, STATUS,
};
use crate::models::{Record, SearchCategory, Suggestion};

/// 少于该字符数不做过滤
pub const MIN_QUERY_CHARS: usize = 2;
/// 联想列表上限
pub const MAX_SUGGESTIONS: usize = 10;

const MISSING: &str = "n/a";

/// 按查询文本和搜索范围筛选记录, 生成联想列表
///
/// 大小写不敏感的子串匹配; 保持输入顺序, 最多返回 10 条.
/// 没有发票号的记录无法导航, 不会出现在结果中.
pub fn filter_suggestions(
    query: &str,
    category: SearchCategory,
    records: &[Record],
) -> Vec<Suggestion> {
    if query.chars().count() < MIN_QUERY_CHARS || records.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let suggestions: Vec<Suggestion> = records
        .iter()
        .filter(|record| record.invoice_number().is_some())
        .filter(|record| matches(record, category, &needle))
        .take(MAX_SUGGESTIONS)
        .filter_map(to_suggestion)
        .collect();

    tracing::debug!(
        "过滤 \"{}\" (范围 {}): {} 条记录中匹配 {} 条",
        query,
        category,
        records.len(),
        suggestions.len()
    );
    suggestions
}

/// 单条记录是否匹配; `needle` 必须已转小写
pub fn matches(record: &Record, category: SearchCategory, needle: &str) -> bool {
    match category {
        SearchCategory::All => [INVOICE_NUMBER, NAME, STATEMENT_NUMBER, ORDER_NUMBER]
            .iter()
            .any(|key| contains(record, key, needle)),
        SearchCategory::Invoice => contains(record, INVOICE_NUMBER, needle),
        SearchCategory::Customer => contains(record, NAME, needle),
        SearchCategory::Order => contains(record, ORDER_NUMBER, needle),
        SearchCategory::CreditMemo => typed_reference_matches(record, "credit memo", needle),
        SearchCategory::Receipt => typed_reference_matches(record, "receipt", needle),
    }
}

/// 类型标签相等后, 再匹配发票号或对账单号
fn typed_reference_matches(record: &Record, statement_type: &str, needle: &str) -> bool {
    let type_matches = record
        .text(STATEMENT_TYPE)
        .is_some_and(|t| t.to_lowercase() == statement_type);

    type_matches
        && (contains(record, INVOICE_NUMBER, needle) || contains(record, STATEMENT_NUMBER, needle))
}

/// 缺失字段视为不匹配
fn contains(record: &Record, key: &str, needle: &str) -> bool {
    record
        .text(key)
        .is_some_and(|value| value.to_lowercase().contains(needle))
}

fn field<'a>(record: &'a Record, key: &str) -> std::borrow::Cow<'a, str> {
    record
        .text(key)
        .unwrap_or(std::borrow::Cow::Borrowed(MISSING))
}

fn to_suggestion(record: &Record) -> Option<Suggestion> {
    let value = record.invoice_number()?.into_owned();

    let label = format!(
        "{} - {} - {} - {} {}",
        value,
        field(record, NAME),
        field(record, STATEMENT_TYPE),
        field(record, ORIGINAL_AMOUNT),
        field(record, CURRENCY),
    );
    let description = format!(
        "{} | {} | {}",
        field(record, INVOICE_DATE),
        field(record, STATUS),
        field(record, COUNTRY),
    );

    Some(Suggestion {
        value,
        label,
        description,
    })
}
