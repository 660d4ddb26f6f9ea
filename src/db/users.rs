use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, RegisterUser, Role, UpdateUser};

/// Insert a new user from the registration form. The password arrives
/// already hashed.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: RegisterUser,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(input.email),
        nom: Set(input.nom),
        prenom: Set(input.prenom),
        telephone: Set(input.telephone),
        role: Set(input.role.unwrap_or(Role::Client)),
        is_active: Set(true),
        is_staff: Set(false),
        password_hash: Set(password_hash),
        date_joined: Set(chrono::Utc::now()),
    };

    new_user.insert(db).await
}

/// Fetch all users, paginated.
pub async fn get_users_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::Email)
        .paginate(db, limit)
        .fetch_page(page - 1)
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a single user by email.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Update an existing user (admin-level).
pub async fn update_user(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateUser,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(nom) = input.nom {
        active.nom = Set(nom);
    }
    if let Some(prenom) = input.prenom {
        active.prenom = Set(prenom);
    }
    if let Some(telephone) = input.telephone {
        active.telephone = Set(telephone);
    }
    if let Some(role) = input.role {
        active.role = Set(role);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_staff) = input.is_staff {
        active.is_staff = Set(is_staff);
    }

    active.update(db).await
}

/// Delete a user by ID.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}

/// Count users holding a given role (admin stats).
pub async fn count_by_role(db: &DatabaseConnection, role: Role) -> Result<u64, DbErr> {
    users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .count(db)
        .await
}
