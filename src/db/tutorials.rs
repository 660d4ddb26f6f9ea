use sea_orm::*;
use uuid::Uuid;

use crate::models::training_fields::{self, CreateTrainingField, UpdateTrainingField};
use crate::models::tutorial_categories::{
    self, CreateTutorialCategory, TutorialCategoryQuery, UpdateTutorialCategory,
};
use crate::models::tutorials::{
    self, CreateTutorial, TutorialFormat, TutorialLevel, TutorialListQuery, TutorialStatus,
    UpdateTutorial,
};

// ── training fields ──

pub async fn insert_field(
    db: &DatabaseConnection,
    input: CreateTrainingField,
) -> Result<training_fields::Model, DbErr> {
    let new_field = training_fields::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        icon: Set(input.icon.unwrap_or_default()),
        description: Set(input.description.unwrap_or_default()),
    };

    new_field.insert(db).await
}

pub async fn get_all_fields(db: &DatabaseConnection) -> Result<Vec<training_fields::Model>, DbErr> {
    training_fields::Entity::find()
        .order_by_asc(training_fields::Column::Name)
        .all(db)
        .await
}

pub async fn get_field_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<training_fields::Model>, DbErr> {
    training_fields::Entity::find_by_id(id).one(db).await
}

pub async fn update_field(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateTrainingField,
) -> Result<training_fields::Model, DbErr> {
    let field = training_fields::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Training field not found".to_string()))?;

    let mut active: training_fields::ActiveModel = field.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(icon) = input.icon {
        active.icon = Set(icon);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }

    active.update(db).await
}

pub async fn delete_field(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    training_fields::Entity::delete_by_id(id).exec(db).await
}

// ── tutorial categories ──

pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateTutorialCategory,
) -> Result<tutorial_categories::Model, DbErr> {
    let new_category = tutorial_categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        field_id: Set(input.field_id),
    };

    new_category.insert(db).await
}

pub async fn get_categories(
    db: &DatabaseConnection,
    query: &TutorialCategoryQuery,
) -> Result<Vec<tutorial_categories::Model>, DbErr> {
    let mut find = tutorial_categories::Entity::find();

    if let Some(field) = query.field {
        find = find.filter(tutorial_categories::Column::FieldId.eq(field));
    }

    find.order_by_asc(tutorial_categories::Column::Name)
        .all(db)
        .await
}

pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<tutorial_categories::Model>, DbErr> {
    tutorial_categories::Entity::find_by_id(id).one(db).await
}

pub async fn update_category(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateTutorialCategory,
) -> Result<tutorial_categories::Model, DbErr> {
    let category = tutorial_categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(
            "Tutorial category not found".to_string(),
        ))?;

    let mut active: tutorial_categories::ActiveModel = category.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(field_id) = input.field_id {
        active.field_id = Set(field_id);
    }

    active.update(db).await
}

pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    tutorial_categories::Entity::delete_by_id(id).exec(db).await
}

// ── tutorials ──

pub async fn insert_tutorial(
    db: &DatabaseConnection,
    input: CreateTutorial,
    created_by: Option<Uuid>,
) -> Result<tutorials::Model, DbErr> {
    let new_tutorial = tutorials::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        field_id: Set(input.field_id),
        category_id: Set(input.category_id),
        objectives: Set(input.objectives.unwrap_or_default()),
        skills: Set(input.skills.unwrap_or_default()),
        target_audience: Set(input.target_audience.unwrap_or_default()),
        format: Set(input.format),
        level: Set(input.level),
        resource_url: Set(input.resource_url.unwrap_or_default()),
        image: Set(input.image),
        trainer: Set(input.trainer),
        trainer_profile: Set(input.trainer_profile.unwrap_or_default()),
        schedule: Set(input.schedule),
        status: Set(input.status.unwrap_or(TutorialStatus::Draft)),
        published_at: Set(input.published_at),
        created_by: Set(created_by),
        created_at: Set(chrono::Utc::now()),
    };

    new_tutorial.insert(db).await
}

pub async fn get_tutorials_filtered(
    db: &DatabaseConnection,
    query: &TutorialListQuery,
) -> Result<Vec<tutorials::Model>, DbErr> {
    let mut find = tutorials::Entity::find();

    if let Some(field) = query.field {
        find = find.filter(tutorials::Column::FieldId.eq(field));
    }
    if let Some(category) = query.category {
        find = find.filter(tutorials::Column::CategoryId.eq(category));
    }
    if let Some(format) = query
        .format
        .as_deref()
        .and_then(|f| TutorialFormat::try_from_value(&f.to_string()).ok())
    {
        find = find.filter(tutorials::Column::Format.eq(format));
    }
    if let Some(level) = query
        .level
        .as_deref()
        .and_then(|l| TutorialLevel::try_from_value(&l.to_string()).ok())
    {
        find = find.filter(tutorials::Column::Level.eq(level));
    }
    if let Some(status) = query
        .status
        .as_deref()
        .and_then(|s| TutorialStatus::try_from_value(&s.to_string()).ok())
    {
        find = find.filter(tutorials::Column::Status.eq(status));
    }

    find.order_by_desc(tutorials::Column::CreatedAt).all(db).await
}

pub async fn get_tutorial_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<tutorials::Model>, DbErr> {
    tutorials::Entity::find_by_id(id).one(db).await
}

pub async fn update_tutorial(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateTutorial,
) -> Result<tutorials::Model, DbErr> {
    let tutorial = tutorials::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Tutorial not found".to_string()))?;

    let mut active: tutorials::ActiveModel = tutorial.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(field_id) = input.field_id {
        active.field_id = Set(field_id);
    }
    if let Some(category_id) = input.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(objectives) = input.objectives {
        active.objectives = Set(objectives);
    }
    if let Some(skills) = input.skills {
        active.skills = Set(skills);
    }
    if let Some(target_audience) = input.target_audience {
        active.target_audience = Set(target_audience);
    }
    if let Some(format) = input.format {
        active.format = Set(format);
    }
    if let Some(level) = input.level {
        active.level = Set(level);
    }
    if let Some(resource_url) = input.resource_url {
        active.resource_url = Set(resource_url);
    }
    if let Some(image) = input.image {
        active.image = Set(Some(image));
    }
    if let Some(trainer) = input.trainer {
        active.trainer = Set(trainer);
    }
    if let Some(trainer_profile) = input.trainer_profile {
        active.trainer_profile = Set(trainer_profile);
    }
    if let Some(schedule) = input.schedule {
        active.schedule = Set(Some(schedule));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(published_at) = input.published_at {
        active.published_at = Set(Some(published_at));
    }

    active.update(db).await
}

pub async fn delete_tutorial(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    tutorials::Entity::delete_by_id(id).exec(db).await
}
