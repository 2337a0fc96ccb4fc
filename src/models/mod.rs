pub mod location;
pub mod record;
pub mod record_set;
pub mod search;

pub use location::{Location, INVOICE_NUMBER_PARAM, INVOICE_PATH};
pub use record::{normalize_key, FieldValue, LineItem, Record};
pub use record_set::{RecordOrigin, RecordSet};
pub use search::{SearchCategory, SearchSelector, Suggestion, UnknownCategory};
