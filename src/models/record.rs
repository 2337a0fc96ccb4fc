use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;

/// 发票号 (标识)
pub const INVOICE_NUMBER: &str = "invoice_number";
/// 客户名称
pub const NAME: &str = "name";
/// 对账单号 (次要参考号)
pub const STATEMENT_NUMBER: &str = "statement_number";
/// 订单号
pub const ORDER_NUMBER: &str = "order_number";
/// 单据类型 (Invoice / Credit Memo / Receipt)
pub const STATEMENT_TYPE: &str = "statement_type";

pub const ORIGINAL_AMOUNT: &str = "original_amount";
pub const CURRENCY: &str = "cur";
pub const INVOICE_DATE: &str = "invoice_date";
pub const STATUS: &str = "status";
pub const COUNTRY: &str = "country";

/// 标量字段值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl FieldValue {
    /// 从 JSON 值转换, null 与嵌套结构返回 None
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Number(n.clone())),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// 用于匹配和展示的文本形式
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// 一条发票记录: 规范字段名 -> 标量值, 保持来源中的字段顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从外部 JSON 对象构建, 字段名统一为 snake_case
    ///
    /// `Invoice_Number`、`invoiceNumber`、`"Invoice Number"` 都落到
    /// `invoice_number`. 同名冲突时保留先出现的值.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut fields = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            let Some(value) = FieldValue::from_json(value) else {
                continue;
            };
            fields.entry(normalize_key(key)).or_insert(value);
        }
        Self { fields }
    }

    /// 设置字段 (键按规范名保存)
    pub fn with(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(normalize_key(key), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// 字段的文本形式, 缺失时为 None
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.fields.get(key).map(FieldValue::as_text)
    }

    /// 发票号; 空字符串视为缺失
    pub fn invoice_number(&self) -> Option<Cow<'_, str>> {
        self.text(INVOICE_NUMBER).filter(|s| !s.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Number> for FieldValue {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(Number::from(n))
    }
}

/// 发票明细行, 与 Record 同为扁平字段映射
pub type LineItem = Record;

/// 外部字段名 -> snake_case
///
/// 空格、连字符视作分隔符; 小写或数字后的大写字母开启新词.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;

    for c in key.trim().chars() {
        if c == ' ' || c == '-' || c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        } else if c.is_uppercase() {
            if matches!(prev, Some(p) if p.is_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}
