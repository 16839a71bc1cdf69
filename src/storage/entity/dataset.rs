use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DOMAIN: &str = "Water Resources";
pub const DEFAULT_COLLECTION_NAME: &str = "rainfallrecords";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DatasetType {
    #[sea_orm(string_value = "District-wise")]
    #[serde(rename = "District-wise")]
    DistrictWise,
    #[sea_orm(string_value = "Sub-basin-wise")]
    #[serde(rename = "Sub-basin-wise")]
    SubBasinWise,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "datasets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub domain: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub dataset_type: DatasetType,
    pub source: String,
    pub organization: String, // JSON array
    pub sectors: String,      // JSON array
    pub dataset_id: Option<String>,
    pub collection_name: String,
    pub last_updated: Option<DateTimeUtc>,
    pub api_url: String,
}

impl Model {
    pub fn organization_list(&self) -> Vec<String> {
        serde_json::from_str(&self.organization).unwrap_or_default()
    }

    pub fn sector_list(&self) -> Vec<String> {
        serde_json::from_str(&self.sectors).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
