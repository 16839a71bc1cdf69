//! Mapping of data.gov.in rainfall payloads onto store records.

use crate::ingest::{DatasetKind, IngestError};
use crate::storage::entity::rainfall_record::DEFAULT_SOURCE;
use crate::storage::repository::{NewDataset, NewRainfallRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// A payload turned into store inserts, not yet written.
#[derive(Debug, Clone)]
pub struct MappedPayload {
    pub records: Vec<NewRainfallRecord>,
    pub dataset: NewDataset,
}

/// Field lookup tolerant of the capitalised (`State`) and lower-case
/// (`state`) spellings the API has used.
fn field<'a>(item: &'a Value, name: &str) -> Option<&'a Value> {
    item.get(name)
        .or_else(|| item.get(name.to_ascii_lowercase().as_str()))
}

/// Text value, or `None` when absent, null or empty.
fn opt_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Loose numeric coercion: blank and null are 0, anything unparseable is NaN.
pub fn parse_number(v: Option<&Value>) -> f64 {
    match v {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let t = s.trim();
            if t.is_empty() {
                0.0
            } else {
                t.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(_) => f64::NAN,
    }
}

/// Accepts RFC 3339 plus the plain date layouts seen in the datasets.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d-%m-%Y %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

fn text_list(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items.iter().filter_map(|x| opt_text(Some(x))).collect(),
        Some(other) => opt_text(Some(other)).into_iter().collect(),
        None => Vec::new(),
    }
}

/// The `records` array. An API error body has none, which is an error; an
/// explicit empty array is fine.
pub fn records_of(payload: &Value) -> Result<&[Value], IngestError> {
    match payload.get("records") {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(IngestError::Payload("records is not an array".to_string())),
        None => Err(IngestError::Payload(format!(
            "missing records array: {}",
            describe_error_body(payload)
        ))),
    }
}

fn describe_error_body(payload: &Value) -> String {
    match (payload.get("status"), payload.get("message")) {
        (_, Some(Value::String(m))) => m.clone(),
        (Some(Value::String(s)), None) => s.clone(),
        _ => "no message".to_string(),
    }
}

pub fn map_record(
    item: &Value,
    dataset_id: &str,
    kind: DatasetKind,
) -> Result<NewRainfallRecord, String> {
    let date = match field(item, "Date") {
        Some(Value::String(s)) => parse_date(s).ok_or_else(|| format!("invalid Date {s:?}"))?,
        Some(other) => return Err(format!("invalid Date {other}")),
        None => return Err("missing Date".to_string()),
    };

    Ok(NewRainfallRecord {
        dataset_id: dataset_id.to_string(),
        category: kind.category(),
        state: opt_text(field(item, "State")),
        district: opt_text(field(item, "District")),
        basin: opt_text(field(item, "Basin")),
        subbasin: opt_text(field(item, "Subbasin")),
        date,
        year: parse_number(field(item, "Year")),
        month: parse_number(field(item, "Month")),
        avg_rainfall: parse_number(field(item, "Avg_rainfall")),
        agency_name: opt_text(field(item, "Agency_name")),
    })
}

pub fn map_payload(
    payload: &Value,
    kind: DatasetKind,
    api_url: &str,
) -> Result<MappedPayload, IngestError> {
    if !payload.is_object() {
        return Err(IngestError::Payload("payload is not a JSON object".to_string()));
    }
    let index_name = opt_text(payload.get("index_name"));
    let dataset_id = index_name.clone().unwrap_or_default();

    let records = records_of(payload)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            map_record(item, &dataset_id, kind)
                .map_err(|reason| IngestError::Mapping { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let dataset = NewDataset {
        title: opt_text(payload.get("title")),
        description: opt_text(payload.get("desc")),
        dataset_type: kind.dataset_type(),
        source: DEFAULT_SOURCE.to_string(),
        organization: text_list(payload.get("org")),
        sectors: text_list(payload.get("sector")),
        dataset_id: index_name,
        last_updated: payload
            .get("updated_date")
            .and_then(|v| v.as_str())
            .and_then(parse_date),
        api_url: api_url.to_string(),
    };

    Ok(MappedPayload { records, dataset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::entity::dataset::DatasetType;
    use crate::storage::entity::rainfall_record::Category;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn numbers_follow_loose_coercion() {
        assert_eq!(parse_number(Some(&json!("12.5"))), 12.5);
        assert_eq!(parse_number(Some(&json!(" 7 "))), 7.0);
        assert_eq!(parse_number(Some(&json!(""))), 0.0);
        assert_eq!(parse_number(Some(&Value::Null)), 0.0);
        assert!(parse_number(Some(&json!("NA"))).is_nan());
        assert!(parse_number(None).is_nan());
    }

    #[test]
    fn dates_accept_common_layouts() {
        let d = parse_date("2019-07-01").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2019, 7, 1));
        assert_eq!(parse_date("01-07-2019"), Some(d));
        assert_eq!(parse_date("01/07/2019"), Some(d));
        assert!(parse_date("2019-07-01T05:30:00+05:30").is_some());
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn district_record_maps_fields_and_nulls() {
        let item = json!({
            "State": "Kerala",
            "District": "Idukki",
            "Date": "2020-06-01",
            "Year": "2020",
            "Month": "6",
            "Avg_rainfall": "NA",
            "Agency_name": ""
        });
        let r = map_record(&item, "rain_d", DatasetKind::District).unwrap();
        assert_eq!(r.category, Category::District);
        assert_eq!(r.state.as_deref(), Some("Kerala"));
        assert_eq!(r.basin, None);
        assert_eq!(r.agency_name, None);
        assert_eq!(r.year, 2020.0);
        assert!(r.avg_rainfall.is_nan());
    }

    #[test]
    fn category_comes_from_kind_not_content() {
        let item = json!({"State": "Kerala", "Date": "2020-06-01"});
        let r = map_record(&item, "x", DatasetKind::Subbasin).unwrap();
        assert_eq!(r.category, Category::SubBasin);
    }

    #[test]
    fn missing_date_is_a_mapping_error() {
        let payload = json!({"index_name": "x", "records": [{"Date": "2020-01-01"}, {"State": "Goa"}]});
        let err = map_payload(&payload, DatasetKind::District, "u").unwrap_err();
        assert!(matches!(err, IngestError::Mapping { index: 1, .. }));
    }

    #[test]
    fn error_body_without_records_is_rejected() {
        let body = json!({"status": "error", "message": "Invalid API key"});
        match map_payload(&body, DatasetKind::District, "u") {
            Err(IngestError::Payload(msg)) => assert!(msg.contains("Invalid API key")),
            other => panic!("unexpected {other:?}"),
        }
        let odd = json!({"records": {"State": "Goa"}});
        assert!(matches!(
            map_payload(&odd, DatasetKind::District, "u"),
            Err(IngestError::Payload(_))
        ));
    }

    #[test]
    fn payload_metadata_fills_dataset() {
        let payload = json!({
            "index_name": "6c05cd1b",
            "title": "Daily District-wise Rainfall",
            "desc": "Rainfall data",
            "org": ["Ministry of Jal Shakti", "CWC"],
            "sector": ["Water Resources"],
            "updated_date": "2024-03-05T10:00:00Z",
            "records": []
        });
        let mapped = map_payload(&payload, DatasetKind::Subbasin, "https://api").unwrap();
        assert!(mapped.records.is_empty());
        assert_eq!(mapped.dataset.dataset_type, DatasetType::SubBasinWise);
        assert_eq!(mapped.dataset.organization.len(), 2);
        assert_eq!(mapped.dataset.dataset_id.as_deref(), Some("6c05cd1b"));
        assert!(mapped.dataset.last_updated.is_some());
        assert_eq!(mapped.dataset.api_url, "https://api");
    }
}
