use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ArtisanProfiles {
    Table,
    Id,
    UserId,
    DescriptionArtisan,
    BoutiqueId,
    Statut,
    Departement,
    Ville,
    NoteMoyenne,
    NombreAvis,
    PhotoProfil,
    DemandeTimbre,
    AttestationEnregistrement,
    PhotosProduits,
    PlanLocalisation,
    CopieCni,
    QrCode,
    ProfilComplet,
    Facebook,
    Instagram,
    Whatsapp,
    OpeningHours,
    Galerie,
    Latitude,
    Longitude,
    DateInscription,
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
                    .table(ArtisanProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtisanProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::DescriptionArtisan)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ArtisanProfiles::BoutiqueId).string().null())
                    .col(ColumnDef::new(ArtisanProfiles::Statut).string().not_null())
                    .col(
                        ColumnDef::new(ArtisanProfiles::Departement)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::Ville)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::NoteMoyenne)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::NombreAvis)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ArtisanProfiles::PhotoProfil).string().null())
                    .col(
                        ColumnDef::new(ArtisanProfiles::DemandeTimbre)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::AttestationEnregistrement)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::PhotosProduits)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ArtisanProfiles::PlanLocalisation)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(ArtisanProfiles::CopieCni).string().null())
                    .col(ColumnDef::new(ArtisanProfiles::QrCode).string().null())
                    .col(
                        ColumnDef::new(ArtisanProfiles::ProfilComplet)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ArtisanProfiles::Facebook).string().null())
                    .col(ColumnDef::new(ArtisanProfiles::Instagram).string().null())
                    .col(ColumnDef::new(ArtisanProfiles::Whatsapp).string().null())
                    .col(ColumnDef::new(ArtisanProfiles::OpeningHours).text().null())
                    .col(
                        ColumnDef::new(ArtisanProfiles::Galerie)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ArtisanProfiles::Latitude).double().null())
                    .col(ColumnDef::new(ArtisanProfiles::Longitude).double().null())
                    .col(
                        ColumnDef::new(ArtisanProfiles::DateInscription)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artisan_profiles_user")
                            .from(ArtisanProfiles::Table, ArtisanProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtisanProfiles::Table).to_owned())
            .await
    }
}
