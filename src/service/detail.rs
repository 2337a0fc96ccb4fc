use super::navigation::Navigator;
use crate::models::{LineItem, Location, Record, RecordSet, INVOICE_NUMBER_PARAM};
use crate::source::InvoiceLookup;
use serde::Serialize;
use std::sync::Arc;

/// 详情查询失败且无可回退记录时的提示
pub const LOAD_ERROR_MESSAGE: &str = "error loading data";

/// 详情页状态
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailState {
    Found {
        invoice: Record,
        line_items: Vec<LineItem>,
    },
    /// 没有任何可展示的记录
    Empty,
    Error {
        message: String,
    },
}

/// 详情页解析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// 解析后的当前位置
    pub location: Location,
    /// 位置是否被替换 (回退到第一条记录)
    pub replaced: bool,
    #[serde(flatten)]
    pub state: DetailState,
}

/// 根据位置中的 `invoice_number` 解析详情记录
///
/// 先查已加载记录, 再按需走远程单条查询; 参数缺失或查无此票时回退到
/// 已加载的第一条记录, 并以 replace 方式改写位置. 查不到不是错误.
pub struct DetailResolver {
    records: RecordSet,
    lookup: Option<Arc<dyn InvoiceLookup>>,
}

impl DetailResolver {
    pub fn new(records: RecordSet, lookup: Option<Arc<dyn InvoiceLookup>>) -> Self {
        Self { records, lookup }
    }

    pub async fn resolve(&self, navigator: &mut Navigator) -> DetailView {
        let requested = navigator.current().invoice_number().map(str::to_string);
        let mut lookup_failed = false;

        if let Some(invoice_number) = requested.as_deref() {
            if let Some(record) = self.records.find(invoice_number) {
                return self.found(navigator.current().clone(), false, record.clone()).await;
            }

            match &self.lookup {
                Some(lookup) => match lookup.get_invoice(invoice_number).await {
                    Ok(Some(record)) => {
                        tracing::info!("Invoice {} resolved remotely", invoice_number);
                        return self.found(navigator.current().clone(), false, record).await;
                    }
                    Ok(None) => tracing::warn!("Invoice {} not found", invoice_number),
                    Err(e) => {
                        tracing::warn!("Invoice {} lookup failed: {}", invoice_number, e);
                        lookup_failed = true;
                    }
                },
                None => tracing::warn!("Invoice {} not found", invoice_number),
            }
        }

        let first = self
            .records
            .records()
            .iter()
            .find_map(|r| r.invoice_number().map(|id| (id.into_owned(), r)));

        match first {
            Some((id, record)) => {
                let location = navigator
                    .current()
                    .clone()
                    .with_param(INVOICE_NUMBER_PARAM, &id);
                navigator.replace(location.clone());
                self.found(location, true, record.clone()).await
            }
            None if lookup_failed => DetailView {
                location: navigator.current().clone(),
                replaced: false,
                state: DetailState::Error {
                    message: LOAD_ERROR_MESSAGE.to_string(),
                },
            },
            None => DetailView {
                location: navigator.current().clone(),
                replaced: false,
                state: DetailState::Empty,
            },
        }
    }

    async fn found(&self, location: Location, replaced: bool, invoice: Record) -> DetailView {
        let line_items = match (&self.lookup, invoice.invoice_number()) {
            (Some(lookup), Some(id)) => match lookup.line_items(&id).await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("Line items for {} unavailable: {}", id, e);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };

        DetailView {
            location,
            replaced,
            state: DetailState::Found {
                invoice,
                line_items,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordOrigin;
    use crate::source::embedded::sample_records;
    use crate::source::SourceError;
    use async_trait::async_trait;

    struct FakeLookup {
        known: Option<Record>,
        fail: bool,
    }

    #[async_trait]
    impl InvoiceLookup for FakeLookup {
        async fn get_invoice(&self, invoice_number: &str) -> Result<Option<Record>, SourceError> {
            if self.fail {
                return Err(SourceError::GraphQl("unauthorized".to_string()));
            }
            Ok(self
                .known
                .clone()
                .filter(|r| r.invoice_number().as_deref() == Some(invoice_number)))
        }

        async fn line_items(&self, invoice_number: &str) -> Result<Vec<LineItem>, SourceError> {
            if self.fail {
                return Err(SourceError::GraphQl("unauthorized".to_string()));
            }
            Ok(vec![Record::new()
                .with("invoice_number", invoice_number)
                .with("line_number", 1i64)])
        }
    }

    fn loaded() -> RecordSet {
        RecordSet::new(RecordOrigin::Remote, sample_records())
    }

    fn invoice_of(view: &DetailView) -> Option<String> {
        match &view.state {
            DetailState::Found { invoice, .. } => invoice.invoice_number().map(|c| c.into_owned()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn missing_parameter_replaces_with_first_record() {
        let resolver = DetailResolver::new(loaded(), None);
        let mut navigator = Navigator::new(Location::parse("/invoice"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(view.replaced);
        assert_eq!(invoice_of(&view).as_deref(), Some("FR24131AEI"));
        assert_eq!(navigator.current().to_string(), "/invoice?invoice_number=FR24131AEI");
        assert_eq!(navigator.history_len(), 1);
    }

    #[tokio::test]
    async fn loaded_record_is_resolved_in_place() {
        let resolver = DetailResolver::new(loaded(), None);
        let mut navigator = Navigator::new(Location::invoice("CA24797HYT"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(!view.replaced);
        assert_eq!(invoice_of(&view).as_deref(), Some("CA24797HYT"));
    }

    #[tokio::test]
    async fn miss_falls_back_to_first_without_error() {
        let resolver = DetailResolver::new(loaded(), None);
        let mut navigator = Navigator::new(Location::invoice("NOPE"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(view.replaced);
        assert_eq!(navigator.current().invoice_number(), Some("FR24131AEI"));
    }

    #[tokio::test]
    async fn remote_lookup_fills_unloaded_record() {
        let remote = Record::new()
            .with("Invoice_Number", "US99001ZZZ")
            .with("Name", "Remote Only Inc");
        let lookup = Arc::new(FakeLookup {
            known: Some(remote),
            fail: false,
        });
        let resolver = DetailResolver::new(loaded(), Some(lookup));
        let mut navigator = Navigator::new(Location::invoice("US99001ZZZ"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(!view.replaced);
        match view.state {
            DetailState::Found { invoice, line_items } => {
                assert_eq!(invoice.invoice_number().as_deref(), Some("US99001ZZZ"));
                assert_eq!(line_items.len(), 1);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn remote_miss_falls_back_to_first_with_replace() {
        let lookup = Arc::new(FakeLookup {
            known: None,
            fail: false,
        });
        let resolver = DetailResolver::new(loaded(), Some(lookup));
        let mut navigator = Navigator::new(Location::invoice("US99001ZZZ"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(view.replaced);
        assert_eq!(view.location.to_string(), "/invoice?invoice_number=FR24131AEI");
        assert_eq!(navigator.current().invoice_number(), Some("FR24131AEI"));
        assert_eq!(navigator.history_len(), 1);
        match view.state {
            DetailState::Found { invoice, line_items } => {
                assert_eq!(invoice.invoice_number().as_deref(), Some("FR24131AEI"));
                assert_eq!(line_items[0].invoice_number().as_deref(), Some("FR24131AEI"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn remote_miss_without_records_is_empty_not_error() {
        let lookup = Arc::new(FakeLookup {
            known: None,
            fail: false,
        });
        let empty = RecordSet::new(RecordOrigin::Remote, Vec::new());
        let resolver = DetailResolver::new(empty, Some(lookup));
        let mut navigator = Navigator::new(Location::invoice("US99001ZZZ"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(!view.replaced);
        assert_eq!(view.state, DetailState::Empty);
    }

    #[tokio::test]
    async fn lookup_failure_without_records_is_an_error_state() {
        let lookup = Arc::new(FakeLookup {
            known: None,
            fail: true,
        });
        let empty = RecordSet::new(RecordOrigin::Remote, Vec::new());
        let resolver = DetailResolver::new(empty, Some(lookup));
        let mut navigator = Navigator::new(Location::invoice("FR24131AEI"));

        let view = resolver.resolve(&mut navigator).await;

        assert_eq!(
            view.state,
            DetailState::Error {
                message: LOAD_ERROR_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn lookup_failure_with_records_falls_back() {
        let lookup = Arc::new(FakeLookup {
            known: None,
            fail: true,
        });
        let resolver = DetailResolver::new(loaded(), Some(lookup));
        let mut navigator = Navigator::new(Location::invoice("US99001ZZZ"));

        let view = resolver.resolve(&mut navigator).await;

        assert!(view.replaced);
        match view.state {
            DetailState::Found { line_items, .. } => assert!(line_items.is_empty()),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn nothing_loaded_is_empty() {
        let resolver = DetailResolver::new(RecordSet::new(RecordOrigin::Remote, Vec::new()), None);
        let mut navigator = Navigator::new(Location::parse("/invoice"));

        assert_eq!(resolver.resolve(&mut navigator).await.state, DetailState::Empty);
    }
}
