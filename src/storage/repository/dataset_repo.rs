use crate::storage::entity::dataset::{
    ActiveModel as DatasetActiveModel, DatasetType, Entity as Dataset, Model as DatasetModel,
    DEFAULT_COLLECTION_NAME, DEFAULT_DOMAIN,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

#[derive(Debug, Clone, PartialEq)]
pub struct NewDataset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub dataset_type: DatasetType,
    pub source: String,
    pub organization: Vec<String>,
    pub sectors: Vec<String>,
    pub dataset_id: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub api_url: String,
}

pub struct DatasetRepository;

impl DatasetRepository {
    pub async fn create(
        db: &DatabaseConnection,
        def: NewDataset,
    ) -> Result<DatasetModel, sea_orm::DbErr> {
        let organization =
            serde_json::to_string(&def.organization).unwrap_or_else(|_| "[]".to_string());
        let sectors = serde_json::to_string(&def.sectors).unwrap_or_else(|_| "[]".to_string());

        let active_model = DatasetActiveModel {
            title: Set(def.title),
            description: Set(def.description),
            domain: Set(DEFAULT_DOMAIN.to_string()),
            dataset_type: Set(def.dataset_type),
            source: Set(def.source),
            organization: Set(organization),
            sectors: Set(sectors),
            dataset_id: Set(def.dataset_id),
            collection_name: Set(DEFAULT_COLLECTION_NAME.to_string()),
            last_updated: Set(def.last_updated),
            api_url: Set(def.api_url),
            ..Default::default()
        };

        active_model.insert(db).await
    }

    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<DatasetModel>, sea_orm::DbErr> {
        Dataset::find()
            .order_by_asc(crate::storage::entity::dataset::Column::Id)
            .all(db)
            .await
    }
}
