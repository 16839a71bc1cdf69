use crate::storage::entity::rainfall_record::Category;
use serde_json::{json, Value};

pub const SYSTEM_PROMPT: &str =
    "You are an expert at converting natural language questions about rainfall into database filters. Output only JSON.";

/// JSON shape the model is constrained to.
pub fn query_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "category": {
                "type": "string",
                "description": "Dataset category, either 'District' or 'Sub-basin'."
            },
            "filters": {
                "type": "array",
                "description": "List of key-value filters for the rainfall records.",
                "items": {
                    "type": "object",
                    "properties": {
                        "field": {"type": "string"},
                        "value": {"type": "string"},
                        "operator": {"type": "string"}
                    },
                    "required": ["field", "value"]
                }
            }
        },
        "required": ["category", "filters"]
    })
}

fn quoted_list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}

pub fn build_translate_prompt(user_query: &str) -> String {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let categories = quoted_list(&categories);

    let mut lines = Vec::new();
    lines.push("Turn this query into a structured JSON object that matches the schema.".to_string());
    lines.push("Rules:".to_string());
    lines.push(format!("1. Category must be one of {categories}."));
    lines.push("2. Use only valid fields for that category.".to_string());
    lines.push("3. Default operator is 'equals' unless a comparison is implied.".to_string());
    lines.push("4. Convert month names (e.g. 'January') to numbers (1-12).".to_string());
    lines.push(String::new());
    lines.push(format!("Categories: {categories}"));
    for category in Category::ALL {
        lines.push(format!(
            "{} fields: {}",
            category.as_str(),
            quoted_list(category.queryable_fields())
        ));
    }
    lines.push(String::new());
    lines.push(format!("User Query: \"{user_query}\""));
    lines.join("\n")
}
