pub mod config;
pub mod error;
pub mod job;
pub mod options;
pub mod project;
pub mod reference;
pub mod request;
pub mod service;
pub mod structs;

pub use config::ClientConfig;
pub use error::BigQueryError;
pub use job::{Job, JobHandle, QueryJob};
pub use options::{CreateDisposition, Priority, QueryOptions, WriteDisposition};
pub use project::Project;
pub use reference::{DatasetRef, TableRef};
pub use service::{HttpJobService, JobService};
pub use structs::dataset_reference::DatasetReference;
pub use structs::table_reference::TableReference;
