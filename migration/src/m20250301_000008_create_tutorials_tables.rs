use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum TrainingFields {
    Table,
    Id,
    Name,
    Icon,
    Description,
}

#[derive(DeriveIden)]
enum TutorialCategories {
    Table,
    Id,
    Name,
    FieldId,
}

#[derive(DeriveIden)]
enum Tutorials {
    Table,
    Id,
    Title,
    Description,
    FieldId,
    CategoryId,
    Objectives,
    Skills,
    TargetAudience,
    Format,
    Level,
    ResourceUrl,
    Image,
    Trainer,
    TrainerProfile,
    Schedule,
    Status,
    PublishedAt,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrainingFields::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrainingFields::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrainingFields::Name).string().not_null())
                    .col(
                        ColumnDef::new(TrainingFields::Icon)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TrainingFields::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TutorialCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TutorialCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TutorialCategories::Name)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TutorialCategories::FieldId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutorial_categories_field")
                            .from(TutorialCategories::Table, TutorialCategories::FieldId)
                            .to(TrainingFields::Table, TrainingFields::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tutorials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tutorials::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tutorials::Title).string().not_null())
                    .col(ColumnDef::new(Tutorials::Description).text().not_null())
                    .col(ColumnDef::new(Tutorials::FieldId).uuid().not_null())
                    .col(ColumnDef::new(Tutorials::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Tutorials::Objectives)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Tutorials::Skills)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Tutorials::TargetAudience)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Tutorials::Format).string().not_null())
                    .col(ColumnDef::new(Tutorials::Level).string().not_null())
                    .col(
                        ColumnDef::new(Tutorials::ResourceUrl)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Tutorials::Image).string().null())
                    .col(ColumnDef::new(Tutorials::Trainer).string().not_null())
                    .col(
                        ColumnDef::new(Tutorials::TrainerProfile)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Tutorials::Schedule)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Tutorials::Status).string().not_null())
                    .col(
                        ColumnDef::new(Tutorials::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Tutorials::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Tutorials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutorials_field")
                            .from(Tutorials::Table, Tutorials::FieldId)
                            .to(TrainingFields::Table, TrainingFields::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutorials_category")
                            .from(Tutorials::Table, Tutorials::CategoryId)
                            .to(TutorialCategories::Table, TutorialCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tutorials_created_by")
                            .from(Tutorials::Table, Tutorials::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tutorials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TutorialCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainingFields::Table).to_owned())
            .await
    }
}
