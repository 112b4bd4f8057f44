// web_app/model/mod.rs - Shared data models for client and server
//
// These structs travel between the page session, the products route
// and the upstream REST database. Wire names follow the upstream
// collection schema (`_id`, `vintage_year`) and the JSON the page sends
// in the `q=` parameter (`sortBy`, `pageSize`, ...).

use serde::{Deserialize, Deserializer, Serialize};

/// Default 1-indexed page when the request leaves it out
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the request leaves it out
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Field a product listing can be sorted by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "abv")]
    Abv,
    #[serde(rename = "vintage_year", alias = "vintageYear")]
    VintageYear,
}

impl SortField {
    /// Columns in the order the product table shows them
    pub const COLUMNS: [SortField; 4] = [
        SortField::Id,
        SortField::Name,
        SortField::Abv,
        SortField::VintageYear,
    ];

    /// Field name in the upstream collection
    pub fn upstream_field(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Abv => "abv",
            SortField::VintageYear => "vintage_year",
        }
    }

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::Name => "Name",
            SortField::Abv => "ABV",
            SortField::VintageYear => "Vintage",
        }
    }

    /// Whether clicking the column header changes the sort.
    /// The ID column is display-only.
    pub fn is_header_sortable(&self) -> bool {
        !matches!(self, SortField::Id)
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.upstream_field())
    }
}

/// Product record as stored by the upstream service
///
/// Opaque payload: nothing is validated beyond decoding. Text fields are
/// kept as text because the collection stores them either as strings or
/// as numbers, and any field may be missing when `$fields` hints project
/// the record down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", default, deserialize_with = "string_or_number")]
    pub record_id: String,
    #[serde(rename = "id", default, deserialize_with = "loose_integer")]
    pub numeric_id: i64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub abv: String,
    #[serde(rename = "vintage_year", default, deserialize_with = "string_or_number")]
    pub vintage_year: String,
}

/// Search request sent by the page as JSON in the `q=` parameter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Structured upstream query object, required on the wire
    pub query: serde_json::Value,
    /// Upstream hints (aggregation, projection)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default, alias = "isAscending")]
    pub ascending: bool,
    #[serde(default = "default_page", deserialize_with = "page_number")]
    pub page: u32,
    #[serde(default = "default_page_size", deserialize_with = "page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: serde_json::Value::Object(serde_json::Map::new()),
            hints: None,
            filter: None,
            sort_by: None,
            ascending: false,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            group_by: None,
        }
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Absent, null, zero or negative pages normalize to the first page
fn page_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(positive_or(Option::<f64>::deserialize(deserializer)?, DEFAULT_PAGE))
}

fn page_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(positive_or(Option::<f64>::deserialize(deserializer)?, DEFAULT_PAGE_SIZE))
}

/// Fractions truncate toward zero and anything above `u32::MAX` saturates
fn positive_or(value: Option<f64>, default: u32) -> u32 {
    match value {
        Some(v) if v >= 1.0 => v as u32,
        _ => default,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s,
        Loose::Number(n) => n.to_string(),
        Loose::Missing(()) => String::new(),
    })
}

fn loose_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Integer(i64),
        Float(f64),
        Text(String),
        Missing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Integer(n) => n,
        Loose::Float(f) => f as i64,
        Loose::Text(s) => s.trim().parse().unwrap_or_default(),
        Loose::Missing(()) => 0,
    })
}
