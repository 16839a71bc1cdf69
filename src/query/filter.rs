//! Allow-listed store filter built from the loosely typed field map the
//! translator produces.

use crate::query::structured::FilterValue;
use crate::storage::entity::rainfall_record::Column;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition};
use std::collections::BTreeMap;

/// The only record fields a chat query may constrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    Category,
    State,
    District,
    Basin,
    Subbasin,
    Year,
    Month,
    AgencyName,
}

impl FilterField {
    pub const ALL: [FilterField; 8] = [
        FilterField::Category,
        FilterField::State,
        FilterField::District,
        FilterField::Basin,
        FilterField::Subbasin,
        FilterField::Year,
        FilterField::Month,
        FilterField::AgencyName,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Category => "category",
            FilterField::State => "state",
            FilterField::District => "district",
            FilterField::Basin => "basin",
            FilterField::Subbasin => "subbasin",
            FilterField::Year => "year",
            FilterField::Month => "month",
            FilterField::AgencyName => "agency_name",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, FilterField::Year | FilterField::Month)
    }

    fn column(&self) -> Column {
        match self {
            FilterField::Category => Column::Category,
            FilterField::State => Column::State,
            FilterField::District => Column::District,
            FilterField::Basin => Column::Basin,
            FilterField::Subbasin => Column::Subbasin,
            FilterField::Year => Column::Year,
            FilterField::Month => Column::Month,
            FilterField::AgencyName => Column::AgencyName,
        }
    }
}

/// What a single allow-listed field must equal.
#[derive(Clone, Debug, PartialEq)]
pub enum Criterion {
    Text(String),
    Number(i32),
    /// A numeric field given a non-numeric value; matches nothing.
    Unsatisfiable,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RainfallFilter {
    criteria: BTreeMap<FilterField, Criterion>,
}

fn is_blank(value: &FilterValue) -> bool {
    match value {
        FilterValue::Null => true,
        FilterValue::Bool(b) => !*b,
        FilterValue::Integer(i) => *i == 0,
        FilterValue::Number(n) => *n == 0.0 || n.is_nan(),
        FilterValue::Text(s) => s.is_empty(),
    }
}

fn coerce_number(value: &FilterValue) -> Criterion {
    let n = match value {
        FilterValue::Null => f64::NAN,
        FilterValue::Bool(b) => f64::from(u8::from(*b)),
        FilterValue::Integer(i) => *i as f64,
        FilterValue::Number(n) => *n,
        FilterValue::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
    };
    if n.is_finite() && n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64 {
        Criterion::Number(n as i32)
    } else {
        Criterion::Unsatisfiable
    }
}

impl RainfallFilter {
    /// Keeps allow-listed keys only. Year and month are coerced to numbers;
    /// empty values and zero are ignored.
    pub fn from_field_map(map: &BTreeMap<String, FilterValue>) -> Self {
        let mut criteria = BTreeMap::new();
        for (key, value) in map {
            let Some(field) = FilterField::parse(key) else {
                debug!("dropping filter on unsupported field {:?}", key);
                continue;
            };
            if is_blank(value) {
                continue;
            }
            let criterion = if field.is_numeric() {
                coerce_number(value)
            } else {
                Criterion::Text(value.to_string())
            };
            criteria.insert(field, criterion);
        }
        Self { criteria }
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn get(&self, field: FilterField) -> Option<&Criterion> {
        self.criteria.get(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FilterField> + '_ {
        self.criteria.keys().copied()
    }

    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        for (field, criterion) in &self.criteria {
            let col = field.column();
            cond = match criterion {
                Criterion::Text(s) => cond.add(col.eq(s.clone())),
                Criterion::Number(n) => cond.add(col.eq(*n)),
                Criterion::Unsatisfiable => cond.add(Expr::val(1).eq(0)),
            };
        }
        cond
    }
}
