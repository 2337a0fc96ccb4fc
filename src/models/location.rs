use serde::{Serialize, Serializer};
use std::fmt;

/// 发票详情页路径
pub const INVOICE_PATH: &str = "/invoice";
/// 详情页唯一识别的查询参数
pub const INVOICE_NUMBER_PARAM: &str = "invoice_number";

/// 应用内位置: 路径 + 查询参数 (保持顺序)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    params: Vec<(String, String)>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// `/invoice?invoice_number=<number>`
    pub fn invoice(invoice_number: &str) -> Self {
        Self::new(INVOICE_PATH).with_param(INVOICE_NUMBER_PARAM, invoice_number)
    }

    /// 解析 `path?k=v&k2=v2`, 无法解码的片段按原样保留
    pub fn parse(raw: &str) -> Self {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };
        let path = if path.is_empty() { "/" } else { path };

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(k), decode(v))
            })
            .collect();

        Self {
            path: path.to_string(),
            params,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 设置参数, 已存在时替换第一个同名参数
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
        self
    }

    /// 非空的 `invoice_number` 参数
    pub fn invoice_number(&self) -> Option<&str> {
        self.param(INVOICE_NUMBER_PARAM).filter(|v| !v.is_empty())
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    match urlencoding::decode(&s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s,
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, urlencoding::encode(k), urlencoding::encode(v))?;
        }
        Ok(())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_location_renders_query() {
        let loc = Location::invoice("FR24131AEI");
        assert_eq!(loc.to_string(), "/invoice?invoice_number=FR24131AEI");
        assert_eq!(loc.invoice_number(), Some("FR24131AEI"));
    }

    #[test]
    fn parse_round_trips_encoded_values() {
        let loc = Location::parse("/invoice?tab=lines&invoice_number=A%20B%2F1");
        assert_eq!(loc.path(), "/invoice");
        assert_eq!(loc.invoice_number(), Some("A B/1"));
        assert_eq!(loc.param("tab"), Some("lines"));
        assert_eq!(loc.to_string(), "/invoice?tab=lines&invoice_number=A%20B%2F1");
    }

    #[test]
    fn empty_parameter_counts_as_absent() {
        assert_eq!(Location::parse("/invoice?invoice_number=").invoice_number(), None);
        assert_eq!(Location::parse("/invoice").invoice_number(), None);
    }

    #[test]
    fn with_param_replaces_existing_value() {
        let loc = Location::parse("/invoice?invoice_number=OLD&tab=lines")
            .with_param(INVOICE_NUMBER_PARAM, "NEW");
        assert_eq!(loc.to_string(), "/invoice?invoice_number=NEW&tab=lines");
    }
}
