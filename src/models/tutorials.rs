use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TutorialStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TutorialFormat {
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "pdf")]
    Pdf,
    #[sea_orm(string_value = "workshop")]
    Workshop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TutorialLevel {
    #[sea_orm(string_value = "beginner")]
    Beginner,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "advanced")]
    Advanced,
}

/// SeaORM entity for the `tutorials` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tutorials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub field_id: Uuid,
    pub category_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub objectives: String,
    #[sea_orm(column_type = "Text")]
    pub skills: String,
    pub target_audience: String,
    pub format: TutorialFormat,
    pub level: TutorialLevel,
    pub resource_url: String,
    pub image: Option<String>,
    pub trainer: String,
    #[sea_orm(column_type = "Text")]
    pub trainer_profile: String,
    pub schedule: Option<DateTimeUtc>,
    pub status: TutorialStatus,
    pub published_at: Option<DateTimeUtc>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::training_fields::Entity",
        from = "Column::FieldId",
        to = "super::training_fields::Column::Id"
    )]
    Field,
    #[sea_orm(
        belongs_to = "super::tutorial_categories::Entity",
        from = "Column::CategoryId",
        to = "super::tutorial_categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
}

impl Related<super::training_fields::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Field.def()
    }
}

impl Related<super::tutorial_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTutorial {
    pub title: String,
    pub description: String,
    pub field_id: Uuid,
    pub category_id: Uuid,
    pub objectives: Option<String>,
    pub skills: Option<String>,
    pub target_audience: Option<String>,
    pub format: TutorialFormat,
    pub level: TutorialLevel,
    pub resource_url: Option<String>,
    pub image: Option<String>,
    pub trainer: String,
    pub trainer_profile: Option<String>,
    pub schedule: Option<DateTimeUtc>,
    pub status: Option<TutorialStatus>,
    pub published_at: Option<DateTimeUtc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTutorial {
    pub title: Option<String>,
    pub description: Option<String>,
    pub field_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub objectives: Option<String>,
    pub skills: Option<String>,
    pub target_audience: Option<String>,
    pub format: Option<TutorialFormat>,
    pub level: Option<TutorialLevel>,
    pub resource_url: Option<String>,
    pub image: Option<String>,
    pub trainer: Option<String>,
    pub trainer_profile: Option<String>,
    pub schedule: Option<DateTimeUtc>,
    pub status: Option<TutorialStatus>,
    pub published_at: Option<DateTimeUtc>,
}

/// Query string for `GET /api/tutorials`.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorialListQuery {
    pub field: Option<Uuid>,
    pub category: Option<Uuid>,
    pub format: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
}
