pub mod dataset_reference;
pub mod error_proto;
pub mod job;
pub mod job_configuration;
pub mod job_configuration_query;
pub mod job_reference;
pub mod job_status;
pub mod table_reference;
