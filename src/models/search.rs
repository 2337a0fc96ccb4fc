use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 搜索范围
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    #[default]
    All,
    Invoice,
    Receipt,
    Customer,
    Order,
    CreditMemo,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 6] = [
        SearchCategory::All,
        SearchCategory::Invoice,
        SearchCategory::Receipt,
        SearchCategory::Customer,
        SearchCategory::Order,
        SearchCategory::CreditMemo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::All => "all",
            SearchCategory::Invoice => "invoice",
            SearchCategory::Receipt => "receipt",
            SearchCategory::Customer => "customer",
            SearchCategory::Order => "order",
            SearchCategory::CreditMemo => "credit_memo",
        }
    }

    /// 下拉框显示名
    pub fn label(&self) -> &'static str {
        match self {
            SearchCategory::All => "All",
            SearchCategory::Invoice => "Invoice",
            SearchCategory::Receipt => "Receipt",
            SearchCategory::Customer => "Customer",
            SearchCategory::Order => "Order",
            SearchCategory::CreditMemo => "Credit Memo",
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for SearchCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// 搜索下拉框选项: 范围 + 显示名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchSelector {
    pub value: SearchCategory,
    pub label: &'static str,
}

impl SearchSelector {
    pub fn new(value: SearchCategory) -> Self {
        Self {
            value,
            label: value.label(),
        }
    }

    /// 全部选项, 顺序与下拉框一致
    pub fn options() -> Vec<SearchSelector> {
        SearchCategory::ALL.into_iter().map(SearchSelector::new).collect()
    }
}

impl Default for SearchSelector {
    fn default() -> Self {
        Self::new(SearchCategory::All)
    }
}

/// 联想列表中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// 发票号, 用于导航
    pub value: String,
    pub label: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_snake_case() {
        assert_eq!("credit_memo".parse::<SearchCategory>(), Ok(SearchCategory::CreditMemo));
        assert_eq!("all".parse::<SearchCategory>(), Ok(SearchCategory::All));
        assert!("Credit Memo".parse::<SearchCategory>().is_err());
    }

    #[test]
    fn options_follow_dropdown_order() {
        let labels: Vec<_> = SearchSelector::options().iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            ["All", "Invoice", "Receipt", "Customer", "Order", "Credit Memo"]
        );
    }

    #[test]
    fn selector_serializes_value_and_label() {
        let json = serde_json::to_value(SearchSelector::new(SearchCategory::CreditMemo)).unwrap();
        assert_eq!(json, serde_json::json!({ "value": "credit_memo", "label": "Credit Memo" }));
    }
}
