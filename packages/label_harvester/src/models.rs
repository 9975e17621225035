use serde::Deserialize;

/// Product list returned for a manufacturer
#[derive(Deserialize, Debug, Default)]
pub struct ProductList {
    /// Products in catalog order
    #[serde(rename = "Lst", default)]
    pub products: Vec<ProductRecord>,
}

/// Product entry of a product list
#[derive(Deserialize, Debug, Clone)]
pub struct ProductRecord {
    /// Product identifier, used to query the document list
    #[serde(rename = "Id", default)]
    pub id: i64,
}

/// Document list returned for a product
#[derive(Deserialize, Debug, Default)]
pub struct DocumentList {
    /// Server-relative folder holding the product's files
    #[serde(rename = "LabelFolder", default)]
    pub label_folder: String,
    /// Documents in catalog order
    #[serde(rename = "Lst", default)]
    pub documents: Vec<DocumentRecord>,
}

/// Document entry of a document list
#[derive(Deserialize, Debug, Clone)]
pub struct DocumentRecord {
    /// File name under the label folder
    #[serde(rename = "FileName", default)]
    pub file_name: String,
}
