//! Spreadsheet facade (`GOOGLESHEETS`).

use crate::engine::ToolEngine;
use crate::tools::ToolDescriptor;
use crate::types::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TOOLKIT: &str = "GOOGLESHEETS";

pub const BATCH_GET: &str = "GOOGLESHEETS_BATCH_GET";
pub const VALUES_UPDATE: &str = "GOOGLESHEETS_VALUES_UPDATE";
pub const CREATE_SPREADSHEET: &str = "GOOGLESHEETS_CREATE_GOOGLE_SHEET1";
pub const SHEET_OPERATION: &str = "GOOGLESHEETS_SHEET_OPERATION";

pub const VALUE_INPUT_OPTIONS: [&str; 2] = ["RAW", "USER_ENTERED"];
pub const MAJOR_DIMENSIONS: [&str; 2] = ["ROWS", "COLUMNS"];
pub const OPERATIONS: [&str; 4] = ["add_sheet", "delete_sheet", "rename_sheet", "clear_values"];

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(TOOLKIT, BATCH_GET)
            .describe("Read one or more ranges")
            .required(["spreadsheet_id", "ranges"]),
        ToolDescriptor::new(TOOLKIT, VALUES_UPDATE)
            .describe("Write a block of values into a range")
            .required(["spreadsheet_id", "range", "values"])
            .constrained("value_input_option", VALUE_INPUT_OPTIONS)
            .constrained("major_dimension", MAJOR_DIMENSIONS)
            .default_value("value_input_option", "USER_ENTERED")
            .default_value("major_dimension", "ROWS"),
        ToolDescriptor::new(TOOLKIT, CREATE_SPREADSHEET)
            .describe("Create an empty spreadsheet")
            .required(["title"]),
        ToolDescriptor::new(TOOLKIT, SHEET_OPERATION)
            .describe("Structural operation on one sheet of a spreadsheet")
            .required(["spreadsheet_id", "operation"])
            .constrained("operation", OPERATIONS),
    ]
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValuesUpdateParams {
    pub spreadsheet_id: String,
    pub range: String,
    pub values: Vec<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_input_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetOperationParams {
    pub spreadsheet_id: String,
    /// One of [`OPERATIONS`].
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
}

#[derive(Serialize)]
struct BatchGetParams<'a> {
    spreadsheet_id: &'a str,
    ranges: &'a [String],
}

#[derive(Serialize)]
struct CreateParams<'a> {
    title: &'a str,
}

// =============================================================================
// Results
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    #[serde(default)]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetResult {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u64>,
    #[serde(default)]
    pub updated_columns: Option<u64>,
    #[serde(default)]
    pub updated_cells: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSpreadsheet {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub spreadsheet_url: Option<String>,
}

// =============================================================================
// Facade
// =============================================================================

#[derive(Debug, Clone)]
pub struct SheetsTools {
    engine: ToolEngine,
}

impl SheetsTools {
    pub fn new(engine: ToolEngine) -> Self {
        Self { engine }
    }

    pub async fn batch_get(&self, spreadsheet_id: &str, ranges: &[String]) -> Result<BatchGetResult> {
        let params = BatchGetParams {
            spreadsheet_id,
            ranges,
        };
        self.engine.call(TOOLKIT, BATCH_GET, &params).await
    }

    pub async fn update_values(&self, params: &ValuesUpdateParams) -> Result<UpdateResult> {
        self.engine.call(TOOLKIT, VALUES_UPDATE, params).await
    }

    pub async fn create_spreadsheet(&self, title: &str) -> Result<CreatedSpreadsheet> {
        self.engine
            .call(TOOLKIT, CREATE_SPREADSHEET, &CreateParams { title })
            .await
    }

    /// Result shape varies per operation, so `data` is returned raw.
    pub async fn sheet_operation(&self, params: &SheetOperationParams) -> Result<Value> {
        self.engine.call(TOOLKIT, SHEET_OPERATION, params).await
    }
}
