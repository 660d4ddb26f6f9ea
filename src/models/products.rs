use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ProductStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// SeaORM entity for the `products` table.
///
/// `variants` is a JSON list of free-form labels, e.g.
/// `["Rouge/Or", "Bleu/Argent", "Vert/Bronze"]`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category_id: Uuid,
    pub artisan_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
    pub status: ProductStatus,
    pub variants: Json,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::artisans::Entity",
        from = "Column::ArtisanId",
        to = "super::artisans::Column::Id"
    )]
    Artisan,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::artisans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artisan.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub artisan_id: Option<Uuid>,
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
    pub status: Option<ProductStatus>,
    pub variants: Option<Vec<String>>,
}

impl CreateProduct {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.stock < 0 {
            return Err("Le stock ne peut pas être négatif");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub artisan_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub image: Option<String>,
    pub status: Option<ProductStatus>,
    pub variants: Option<Vec<String>>,
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.stock.is_some_and(|s| s < 0) {
            return Err("Le stock ne peut pas être négatif");
        }
        Ok(())
    }
}

/// Query string for `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<Uuid>,
    pub status: Option<String>,
    pub artisan: Option<Uuid>,
    pub ville: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_stock_is_rejected_on_create() {
        let mut input = CreateProduct {
            name: "Panier tressé".to_string(),
            description: "Panier en osier".to_string(),
            category_id: Uuid::new_v4(),
            artisan_id: None,
            price: Decimal::new(2500, 2),
            stock: -1,
            image: None,
            status: None,
            variants: None,
        };
        assert!(input.validate().is_err());

        input.stock = 0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_stock_is_rejected_on_update() {
        let mut input = UpdateProduct {
            name: None,
            description: None,
            category_id: None,
            artisan_id: None,
            price: None,
            stock: Some(-5),
            image: None,
            status: None,
            variants: None,
        };
        assert!(input.validate().is_err());

        input.stock = None;
        assert!(input.validate().is_ok());
    }
}
