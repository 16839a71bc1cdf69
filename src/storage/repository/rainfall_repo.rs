use crate::query::filter::RainfallFilter;
use crate::storage::entity::rainfall_record::{
    ActiveModel as RainfallActiveModel, Category, Entity as RainfallRecord,
    Model as RainfallModel, DEFAULT_SOURCE,
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set};

/// Upper bound on records returned to a chat query.
pub const MAX_QUERY_RESULTS: u64 = 100;

/// Rows per INSERT statement; keeps SQLite under its bound-variable limit.
const INSERT_CHUNK: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct NewRainfallRecord {
    pub dataset_id: String,
    pub category: Category,
    pub state: Option<String>,
    pub district: Option<String>,
    pub basin: Option<String>,
    pub subbasin: Option<String>,
    pub date: DateTime<Utc>,
    pub year: f64,
    pub month: f64,
    pub avg_rainfall: f64,
    pub agency_name: Option<String>,
}

fn finite_int(v: f64) -> Option<i32> {
    (v.is_finite() && v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64)
        .then_some(v as i32)
}

impl From<NewRainfallRecord> for RainfallActiveModel {
    fn from(r: NewRainfallRecord) -> Self {
        RainfallActiveModel {
            dataset_id: Set(r.dataset_id),
            category: Set(r.category),
            state: Set(r.state),
            district: Set(r.district),
            basin: Set(r.basin),
            subbasin: Set(r.subbasin),
            date: Set(r.date),
            year: Set(finite_int(r.year)),
            month: Set(finite_int(r.month)),
            avg_rainfall: Set(Some(r.avg_rainfall).filter(|v| v.is_finite())),
            agency_name: Set(r.agency_name),
            source: Set(DEFAULT_SOURCE.to_string()),
            ..Default::default()
        }
    }
}

pub struct RainfallRepository;

impl RainfallRepository {
    /// Bulk insert. Chunks already written stay written if a later one fails.
    pub async fn insert_many(
        db: &DatabaseConnection,
        records: Vec<NewRainfallRecord>,
    ) -> Result<usize, sea_orm::DbErr> {
        if records.is_empty() {
            return Ok(0);
        }

        let total = records.len();
        let mut models: Vec<RainfallActiveModel> = records.into_iter().map(Into::into).collect();
        while !models.is_empty() {
            let rest = models.split_off(models.len().min(INSERT_CHUNK));
            RainfallRecord::insert_many(models).exec(db).await?;
            models = rest;
        }
        Ok(total)
    }

    /// Runs an allow-listed filter, capped at [`MAX_QUERY_RESULTS`] rows in
    /// store order.
    pub async fn find_by_filter(
        db: &DatabaseConnection,
        filter: &RainfallFilter,
    ) -> Result<Vec<RainfallModel>, sea_orm::DbErr> {
        RainfallRecord::find()
            .filter(filter.condition())
            .limit(MAX_QUERY_RESULTS)
            .all(db)
            .await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, sea_orm::DbErr> {
        RainfallRecord::find().count(db).await
    }
}
