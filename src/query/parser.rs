use crate::query::structured::StructuredQuery;
use regex::Regex;
use std::sync::OnceLock;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^```(?:json|JSON)?\s*(.*?)\s*```$").expect("static regex is valid")
    })
}

/// Drops a surrounding markdown code fence if the model added one.
pub fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    match fence_re().captures(t).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => t,
    }
}

/// Parses model output into a query and converts month names.
pub fn parse_structured_query(text: &str) -> Result<StructuredQuery, serde_json::Error> {
    let mut query: StructuredQuery = serde_json::from_str(strip_code_fence(text))?;
    query.normalize_months();
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::structured::FilterValue;
    use crate::storage::entity::rainfall_record::Category;

    #[test]
    fn parses_plain_json() {
        let q = parse_structured_query(
            r#" {"category":"Sub-basin","filters":[{"field":"basin","value":"Ganga","operator":"equals"}]} "#,
        )
        .unwrap();
        assert_eq!(q.category, Category::SubBasin);
        assert_eq!(q.filters.len(), 1);
    }

    #[test]
    fn parses_fenced_json_and_converts_month() {
        let text = "```json\n{\"category\":\"District\",\"filters\":[{\"field\":\"month\",\"value\":\"August\"}]}\n```";
        let q = parse_structured_query(text).unwrap();
        assert_eq!(q.filters[0].value, FilterValue::Integer(8));
    }

    #[test]
    fn rejects_prose() {
        assert!(parse_structured_query("I could not understand the question.").is_err());
    }

    #[test]
    fn rejects_missing_category() {
        assert!(parse_structured_query(r#"{"filters":[]}"#).is_err());
    }
}
