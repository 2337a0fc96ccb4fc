use super::client::GraphQlClient;
use super::error::SourceError;
use crate::models::{LineItem, Record};
use serde_json::{json, Value};

/// 发票列表
pub const LIST_INVOICES: &str = r#"
query ListInvoices {
  listInvoices {
    items {
      invoiceNumber
      statementNumber
      statementType
      statementKey
      invoiceDate
      dueDate
      name
      customerNumber
      accountId
      originalAmount
      openAmount
      cur
      functionalAmount
      functionalOpenAmount
      fxCur
      fxRate
      status
      country
      netTerm
      orderNumber
    }
  }
}
"#;

/// 按发票号查询单张发票
pub const GET_INVOICE: &str = r#"
query GetInvoice($invoiceNumber: String!) {
  getInvoice(invoiceNumber: $invoiceNumber) {
    invoiceNumber
    statementNumber
    statementType
    statementKey
    invoiceDate
    dueDate
    name
    customerNumber
    accountId
    originalAmount
    openAmount
    cur
    functionalAmount
    functionalOpenAmount
    fxCur
    fxRate
    status
    country
    netTerm
    orderNumber
  }
}
"#;

/// 发票明细行
pub const LIST_LINE_ITEMS: &str = r#"
query ListInvoiceLineItems($invoiceNumber: String!) {
  listInvoiceLineItems(filter: { invoiceNumber: { eq: $invoiceNumber } }) {
    items {
      invoiceNumber
      lineNumber
      orderNumber
      productDescription
      quantity
      unitPrice
      principalAmount
      discount
      tax
      shippingCharge
    }
  }
}
"#;

/// 查询全部发票
pub async fn list_invoices(client: &GraphQlClient) -> Result<Vec<Record>, SourceError> {
    let data = client.execute(LIST_INVOICES, json!({})).await?;
    decode_records(list_items(&data, "listInvoices")?)
}

/// 按发票号查询; 不存在时返回 None
pub async fn get_invoice(
    client: &GraphQlClient,
    invoice_number: &str,
) -> Result<Option<Record>, SourceError> {
    let data = client
        .execute(GET_INVOICE, json!({ "invoiceNumber": invoice_number }))
        .await?;

    match data.get("getInvoice") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) => Ok(Some(Record::from_object(object))),
        Some(other) => Err(SourceError::Shape(format!(
            "getInvoice is not an object: {}",
            other
        ))),
    }
}

/// 查询发票明细行, 按接口返回顺序
pub async fn list_line_items(
    client: &GraphQlClient,
    invoice_number: &str,
) -> Result<Vec<LineItem>, SourceError> {
    let data = client
        .execute(LIST_LINE_ITEMS, json!({ "invoiceNumber": invoice_number }))
        .await?;
    decode_records(list_items(&data, "listInvoiceLineItems")?)
}

/// 取出列表字段: 支持 `{ items: [...] }` 或直接数组
fn list_items<'a>(data: &'a Value, field: &str) -> Result<&'a Value, SourceError> {
    let node = data
        .get(field)
        .ok_or_else(|| SourceError::Shape(format!("missing field {}", field)))?;

    match node.get("items") {
        Some(items) => Ok(items),
        None => Ok(node),
    }
}

/// JSON 数组 -> 记录列表; 数组元素必须是对象
pub fn decode_records(value: &Value) -> Result<Vec<Record>, SourceError> {
    let Value::Array(items) = value else {
        return Err(SourceError::Shape("expected a JSON array".to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(object) => Ok(Record::from_object(object)),
            _ => Err(SourceError::Shape(format!("element {} is not an object", idx))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_array_of_objects() {
        let value = json!([{ "Invoice_Number": "A1" }, { "invoiceNumber": "B2" }]);
        let records = decode_records(&value).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].invoice_number().as_deref(), Some("B2"));
    }

    #[test]
    fn decode_rejects_non_array_and_scalar_elements() {
        assert!(matches!(
            decode_records(&json!({ "Invoice_Number": "A1" })),
            Err(SourceError::Shape(_))
        ));
        assert!(matches!(
            decode_records(&json!([{ "Invoice_Number": "A1" }, 42])),
            Err(SourceError::Shape(_))
        ));
    }

    #[test]
    fn list_items_unwraps_connection() {
        let data = json!({ "listInvoices": { "items": [] } });
        assert_eq!(list_items(&data, "listInvoices").unwrap(), &json!([]));

        let data = json!({ "listInvoices": [] });
        assert_eq!(list_items(&data, "listInvoices").unwrap(), &json!([]));

        assert!(list_items(&json!({}), "listInvoices").is_err());
    }
}
