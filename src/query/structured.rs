use crate::storage::entity::rainfall_record::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_OPERATOR: &str = "equals";

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Number of an English month name, case-insensitive.
pub fn month_number(name: &str) -> Option<i64> {
    let name = name.trim().to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as i64 + 1)
}

/// A filter value as the model emits it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Null => Ok(()),
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Integer(i) => write!(f, "{i}"),
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: FilterValue,
    #[serde(default = "default_operator")]
    pub operator: String,
}

fn default_operator() -> String {
    DEFAULT_OPERATOR.to_string()
}

/// The translator's output: a category plus field/value filters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructuredQuery {
    pub category: Category,
    #[serde(default)]
    pub filters: Vec<FieldFilter>,
}

impl StructuredQuery {
    /// Replaces recognised month names with their 1-12 code. Unknown names
    /// are left as text.
    pub fn normalize_months(&mut self) {
        for filter in &mut self.filters {
            if !filter.field.eq_ignore_ascii_case("month") {
                continue;
            }
            if let FilterValue::Text(name) = &filter.value {
                if let Some(n) = month_number(name) {
                    filter.value = FilterValue::Integer(n);
                }
            }
        }
    }

    /// Flattens the filters into field -> value, later duplicates winning,
    /// with `category` set from the query's category.
    pub fn to_field_map(&self) -> BTreeMap<String, FilterValue> {
        let mut map = BTreeMap::new();
        for filter in &self.filters {
            map.insert(filter.field.clone(), filter.value.clone());
        }
        map.insert(
            "category".to_string(),
            FilterValue::Text(self.category.as_str().to_string()),
        );
        map
    }
}
