use crate::error::StageError;
use crate::models::{DocumentList, ProductList};

/// Label folder and document file names of one product
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LabelData {
    pub folder: String,
    pub file_names: Vec<String>,
}

impl LabelData {
    /// An empty folder or an empty file list leaves nothing to download.
    pub fn is_usable(&self) -> bool {
        !self.folder.is_empty() && !self.file_names.is_empty()
    }
}

/// Extracts product IDs from a product list, in source order.
pub fn extract_ids(json_input: &str) -> Result<Vec<i64>, StageError> {
    let parsed: ProductList =
        serde_json::from_str(json_input).map_err(|source| StageError::Decode {
            what: "product list",
            source,
        })?;
    Ok(parsed.products.into_iter().map(|product| product.id).collect())
}

/// Extracts the label folder and every file name from a document list.
pub fn extract_label_data(json_input: &str) -> Result<LabelData, StageError> {
    let parsed: DocumentList =
        serde_json::from_str(json_input).map_err(|source| StageError::Decode {
            what: "document list",
            source,
        })?;
    Ok(LabelData {
        folder: parsed.label_folder,
        file_names: parsed
            .documents
            .into_iter()
            .map(|doc| doc.file_name)
            .collect(),
    })
}
