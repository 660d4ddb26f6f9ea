use sea_orm::*;
use uuid::Uuid;

use crate::models::categories::{self, CreateCategory, UpdateCategory};

pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> Result<categories::Model, DbErr> {
    let new_category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        image: Set(input.image),
    };

    new_category.insert(db).await
}

pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await
}

pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find_by_id(id).one(db).await
}

pub async fn update_category(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateCategory,
) -> Result<categories::Model, DbErr> {
    let category = categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Category not found".to_string()))?;

    let mut active: categories::ActiveModel = category.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(image) = input.image {
        active.image = Set(Some(image));
    }

    active.update(db).await
}

pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    categories::Entity::delete_by_id(id).exec(db).await
}
