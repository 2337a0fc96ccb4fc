use super::filter::filter_suggestions;
use crate::models::{Location, RecordSet, SearchSelector, Suggestion};

/// 位置历史栈
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Location>,
}

impl Navigator {
    pub fn new(start: Location) -> Self {
        Self {
            history: vec![start],
        }
    }

    pub fn current(&self) -> &Location {
        // history 至少有一项
        &self.history[self.history.len() - 1]
    }

    /// 新增历史记录
    pub fn push(&mut self, location: Location) {
        tracing::debug!("navigate -> {}", location);
        self.history.push(location);
    }

    /// 替换当前位置, 不新增历史记录
    pub fn replace(&mut self, location: Location) {
        tracing::debug!("replace -> {}", location);
        let last = self.history.len() - 1;
        self.history[last] = location;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

/// 搜索栏状态: 查询文本、搜索范围、当前联想列表
#[derive(Debug, Clone)]
pub struct SearchSession {
    records: RecordSet,
    selector: SearchSelector,
    query: String,
    suggestions: Vec<Suggestion>,
}

impl SearchSession {
    pub fn new(records: RecordSet, selector: SearchSelector) -> Self {
        Self {
            records,
            selector,
            query: String::new(),
            suggestions: Vec::new(),
        }
    }

    /// 输入变化, 重新过滤
    pub fn set_query(&mut self, query: impl Into<String>) -> &[Suggestion] {
        self.query = query.into();
        self.refilter();
        &self.suggestions
    }

    /// 切换范围后按当前输入重新过滤
    pub fn set_selector(&mut self, selector: SearchSelector) -> &[Suggestion] {
        tracing::debug!("搜索范围切换为 {}", selector.value);
        self.selector = selector;
        self.refilter();
        &self.suggestions
    }

    /// 选中联想项: 跳转到发票详情并清空输入与联想列表
    pub fn select(&mut self, value: &str, navigator: &mut Navigator) -> Location {
        let location = Location::invoice(value);
        tracing::info!("选中发票 {}", value);
        navigator.push(location.clone());
        self.query.clear();
        self.suggestions.clear();
        location
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selector(&self) -> SearchSelector {
        self.selector
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn placeholder(&self) -> &'static str {
        self.records.placeholder()
    }

    fn refilter(&mut self) {
        self.suggestions = filter_suggestions(&self.query, self.selector.value, self.records.records());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordOrigin, SearchCategory};
    use crate::source::embedded::sample_records;

    fn session() -> SearchSession {
        SearchSession::new(
            RecordSet::new(RecordOrigin::Remote, sample_records()),
            SearchSelector::default(),
        )
    }

    #[test]
    fn select_navigates_and_clears() {
        let mut session = session();
        let mut navigator = Navigator::default();

        assert_eq!(session.set_query("FR24").len(), 1);

        let location = session.select("FR24131AEI", &mut navigator);

        assert_eq!(location.invoice_number(), Some("FR24131AEI"));
        assert_eq!(navigator.current().to_string(), "/invoice?invoice_number=FR24131AEI");
        assert_eq!(navigator.history_len(), 2);
        assert_eq!(session.query(), "");
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn selector_change_refilters_current_query() {
        let mut session = session();
        assert_eq!(session.set_query("ca24").len(), 1);

        let selector = SearchSelector::new(SearchCategory::Customer);
        assert!(session.set_selector(selector).is_empty());

        let selector = SearchSelector::new(SearchCategory::CreditMemo);
        assert_eq!(session.set_selector(selector)[0].value, "CA24797HYT");
    }

    #[test]
    fn replace_keeps_history_length() {
        let mut navigator = Navigator::new(Location::parse("/invoice"));
        navigator.replace(Location::invoice("DE24464BEI"));
        assert_eq!(navigator.history_len(), 1);
        assert_eq!(navigator.current().invoice_number(), Some("DE24464BEI"));
    }

    #[test]
    fn placeholder_reflects_origin() {
        assert_eq!(session().placeholder(), "Search...");
    }
}
