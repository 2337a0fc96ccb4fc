pub mod client;
pub mod embedded;
pub mod error;
pub mod queries;
pub mod sources;
pub mod store;

pub use client::{create_http_client, GraphQlClient};
pub use error::SourceError;
pub use sources::{InvoiceLookup, RecordSource, RemoteSource, StaticFileSource};
pub use store::RecordStore;
