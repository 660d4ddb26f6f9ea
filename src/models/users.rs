use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The `Role` enum maps to a Postgres TEXT column stored as lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "artisan")]
    Artisan,
    #[sea_orm(string_value = "client")]
    Client,
}

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_joined: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::artisans::Entity")]
    ArtisanProfile,
    #[sea_orm(has_one = "super::carts::Entity")]
    Cart,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::artisans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtisanProfile.def()
    }
}

impl Related<super::carts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request bodies) ──

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub role: Option<Role>,
    pub password: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Used for admin-level user updates.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub telephone: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

/// A safe user representation for API responses (never leaks the hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTimeUtc,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            nom: m.nom,
            prenom: m.prenom,
            telephone: m.telephone,
            role: m.role,
            is_active: m.is_active,
            is_staff: m.is_staff,
            date_joined: m.date_joined,
        }
    }
}
