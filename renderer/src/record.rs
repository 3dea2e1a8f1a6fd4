use serde::Deserialize;

/// Placeholder rendered for a field the API response did not include.
pub const MISSING_FIELD: &str = "undefined";

/// One row of the breadth dataset as received from the API.
///
/// Every field is optional: the renderer shows whatever the endpoint
/// sent without enforcing a schema, and an absent field is rendered as
/// [`MISSING_FIELD`] instead of failing the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub index_name: Option<String>,
    pub multiplier: Option<i64>,
    pub timespan: Option<String>,
    pub declining: Option<i64>,
    pub unchanged: Option<i64>,
    pub advancing: Option<i64>,
    pub timestamp: Option<String>,
}

impl Record {
    /// Cell texts in header order: each field's string form, or the
    /// placeholder when the field is absent.
    pub fn cells(&self) -> [String; 7] {
        [
            display(&self.index_name),
            display(&self.multiplier),
            display(&self.timespan),
            display(&self.declining),
            display(&self.unchanged),
            display(&self.advancing),
            display(&self.timestamp),
        ]
    }
}

fn display<T: ToString>(field: &Option<T>) -> String {
    field
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| MISSING_FIELD.to_owned())
}
