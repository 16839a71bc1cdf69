use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE: &str = "data.gov.in";

/// Which geography an observation belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Category {
    #[sea_orm(string_value = "District")]
    #[serde(rename = "District", alias = "district")]
    District,
    #[sea_orm(string_value = "Sub-basin")]
    #[serde(rename = "Sub-basin", alias = "sub-basin", alias = "Subbasin", alias = "subbasin")]
    SubBasin,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::District, Category::SubBasin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::District => "District",
            Category::SubBasin => "Sub-basin",
        }
    }

    /// Fields the chat translator may filter on for this category.
    pub fn queryable_fields(&self) -> &'static [&'static str] {
        match self {
            Category::District => &[
                "state",
                "district",
                "year",
                "month",
                "avg_rainfall",
                "agency_name",
            ],
            Category::SubBasin => &[
                "basin",
                "subbasin",
                "year",
                "month",
                "avg_rainfall",
                "agency_name",
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rainfall_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dataset_id: String,
    pub category: Category,
    // District 数据集
    pub state: Option<String>,
    pub district: Option<String>,
    // Sub-basin 数据集
    pub basin: Option<String>,
    pub subbasin: Option<String>,
    pub date: DateTimeUtc,
    // 非数字的原始值落库为 NULL
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub avg_rainfall: Option<f64>,
    pub agency_name: Option<String>,
    pub source: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
