//! Dataset and table arguments that may be given either as an id string or as a
//! fully specified reference.

use crate::error::BigQueryError;
use crate::structs::dataset_reference::DatasetReference;
use crate::structs::table_reference::TableReference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetRef {
    /// Bare dataset id, resolved against the project the job runs in.
    Id(String),
    Reference(DatasetReference),
}

impl DatasetRef {
    pub fn resolve(&self, project_id: &str) -> DatasetReference {
        match self {
            DatasetRef::Id(dataset_id) => DatasetReference::new(project_id, dataset_id.as_str()),
            DatasetRef::Reference(reference) => reference.clone(),
        }
    }
}

impl From<&str> for DatasetRef {
    fn from(dataset_id: &str) -> Self {
        DatasetRef::Id(dataset_id.to_string())
    }
}

impl From<String> for DatasetRef {
    fn from(dataset_id: String) -> Self {
        DatasetRef::Id(dataset_id)
    }
}

impl From<DatasetReference> for DatasetRef {
    fn from(reference: DatasetReference) -> Self {
        DatasetRef::Reference(reference)
    }
}

impl From<&DatasetReference> for DatasetRef {
    fn from(reference: &DatasetReference) -> Self {
        DatasetRef::Reference(reference.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    /// `dataset.table`, `project:dataset.table` or `project.dataset.table`. The project may be
    /// domain-scoped (`google.com:my-project`).
    Id(String),
    Reference(TableReference),
}

impl TableRef {
    pub fn resolve(&self, project_id: &str) -> Result<TableReference, BigQueryError> {
        match self {
            TableRef::Id(id) => parse_table_id(project_id, id),
            TableRef::Reference(reference) => Ok(reference.clone()),
        }
    }
}

impl From<&str> for TableRef {
    fn from(id: &str) -> Self {
        TableRef::Id(id.to_string())
    }
}

impl From<String> for TableRef {
    fn from(id: String) -> Self {
        TableRef::Id(id)
    }
}

impl From<TableReference> for TableRef {
    fn from(reference: TableReference) -> Self {
        TableRef::Reference(reference)
    }
}

impl From<&TableReference> for TableRef {
    fn from(reference: &TableReference) -> Self {
        TableRef::Reference(reference.clone())
    }
}

fn parse_table_id(default_project: &str, id: &str) -> Result<TableReference, BigQueryError> {
    let invalid = || {
        BigQueryError::InvalidArgument(format!(
            "Table id '{}' must look like 'dataset.table', 'project:dataset.table' or 'project.dataset.table'",
            id
        ))
    };
    // Domain-scoped projects carry their own colon, e.g. `google.com:my-project`.
    let (prefix, rest) = match id.rsplit_once(':') {
        Some((prefix, rest)) => (Some(prefix), rest),
        None => (None, id),
    };
    let parts: Vec<&str> = rest.split('.').collect();
    let (project_id, dataset_id, table_id) = match (prefix, parts.as_slice()) {
        (Some(prefix), [dataset_id, table_id]) => (prefix.to_string(), *dataset_id, *table_id),
        (Some(prefix), [project, dataset_id, table_id]) if !project.is_empty() => {
            (format!("{}:{}", prefix, project), *dataset_id, *table_id)
        }
        (None, [dataset_id, table_id]) => (default_project.to_string(), *dataset_id, *table_id),
        (None, [project_id, dataset_id, table_id]) => (project_id.to_string(), *dataset_id, *table_id),
        _ => return Err(invalid()),
    };
    if prefix == Some("") {
        return Err(invalid());
    }
    if project_id.is_empty() || dataset_id.is_empty() || table_id.is_empty() {
        return Err(invalid());
    }
    Ok(TableReference::new(project_id, dataset_id, table_id))
}
