use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `tutorial_categories` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tutorial_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub field_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::training_fields::Entity",
        from = "Column::FieldId",
        to = "super::training_fields::Column::Id"
    )]
    Field,
    #[sea_orm(has_many = "super::tutorials::Entity")]
    Tutorials,
}

impl Related<super::training_fields::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Field.def()
    }
}

impl Related<super::tutorials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutorials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTutorialCategory {
    pub name: String,
    pub field_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTutorialCategory {
    pub name: Option<String>,
    pub field_id: Option<Uuid>,
}

/// Query string for `GET /api/tutorial-categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorialCategoryQuery {
    pub field: Option<Uuid>,
}
