use serde::{Deserialize, Serialize};

use crate::structs::dataset_reference::DatasetReference;

// https://cloud.google.com/bigquery/docs/reference/rest/v2/TableReference
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableReference {
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        TableReference {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    pub fn dataset(&self) -> DatasetReference {
        DatasetReference::new(self.project_id.clone(), self.dataset_id.clone())
    }
}
