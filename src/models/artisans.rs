use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an artisan profile, stored as lowercase French labels.
///
/// `en_attente` is the initial state. `valide` and `suspendu` are reachable
/// from it (and from each other). `supprime` has no workflow transition: it
/// can only be set by a direct administrative data edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ArtisanStatus {
    #[sea_orm(string_value = "en_attente")]
    EnAttente,
    #[sea_orm(string_value = "valide")]
    Valide,
    #[sea_orm(string_value = "suspendu")]
    Suspendu,
    #[sea_orm(string_value = "supprime")]
    Supprime,
}

/// SeaORM entity for the `artisan_profiles` table.
///
/// The five document columns (demande_timbre, attestation_enregistrement,
/// photos_produits, plan_localisation, copie_cni) hold blob URL paths; all
/// five are mandatory at submission. `galerie` is a JSON list of URL paths.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artisan_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description_artisan: String,
    pub boutique_id: Option<String>,
    pub statut: ArtisanStatus,
    pub departement: String,
    pub ville: String,
    pub note_moyenne: f64,
    pub nombre_avis: i32,
    pub photo_profil: Option<String>,
    pub demande_timbre: Option<String>,
    pub attestation_enregistrement: Option<String>,
    pub photos_produits: Option<String>,
    pub plan_localisation: Option<String>,
    pub copie_cni: Option<String>,
    pub qr_code: Option<String>,
    pub profil_complet: bool,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub opening_hours: Option<String>,
    pub galerie: Json,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date_inscription: DateTimeUtc,
}

impl Model {
    /// The gallery as a list of blob URL paths.
    pub fn galerie_paths(&self) -> Vec<String> {
        serde_json::from_value(self.galerie.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Query string for `GET /api/artisans`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtisanListQuery {
    pub nom: Option<String>,
    pub email: Option<String>,
    pub statut: Option<String>,
    pub departement: Option<String>,
}

/// Query string for `GET /api/artisan-by-shop`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopLookupQuery {
    pub boutique_id: Option<String>,
    pub shop_name: Option<String>,
}

/// Profile plus the owning user, matching the nested shape clients expect.
#[derive(Debug, Clone, Serialize)]
pub struct ArtisanResponse {
    pub user: super::users::UserResponse,
    #[serde(flatten)]
    pub profile: Model,
}

impl ArtisanResponse {
    pub fn new(profile: Model, user: super::users::Model) -> Self {
        Self {
            user: user.into(),
            profile,
        }
    }
}

/// Body of the admin bulk status endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkStatusRequest {
    pub ids: Vec<Uuid>,
}

/// Collected onboarding submission, after the uploaded files have been
/// written to blob storage. All five document paths are mandatory by the
/// time this struct exists.
#[derive(Debug, Clone)]
pub struct ArtisanSubmission {
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub password_hash: String,
    pub description_artisan: String,
    pub boutique_id: Option<String>,
    pub departement: String,
    pub ville: String,
    pub photo_profil: Option<String>,
    pub demande_timbre: String,
    pub attestation_enregistrement: String,
    pub photos_produits: String,
    pub plan_localisation: String,
    pub copie_cni: String,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
    pub opening_hours: Option<String>,
    pub galerie: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Self-service profile update. `galerie_append` adds to the existing
/// gallery rather than replacing it.
#[derive(Debug, Clone, Default)]
pub struct ArtisanProfileUpdate {
    pub description_artisan: Option<String>,
    pub boutique_id: Option<String>,
    pub departement: Option<String>,
    pub ville: Option<String>,
    pub photo_profil: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub whatsapp: Option<String>,
    pub opening_hours: Option<String>,
    pub galerie_append: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ArtisanProfileUpdate {
    /// Completeness of `profile` as it will look once this update is
    /// applied, so the flag can be persisted in the same write as the
    /// rest of the changes.
    pub fn completeness_after(&self, profile: &Model) -> bool {
        let description = self
            .description_artisan
            .as_deref()
            .unwrap_or(&profile.description_artisan);
        let has_photo = self.photo_profil.is_some() || profile.photo_profil.is_some();
        let has_galerie =
            !self.galerie_append.is_empty() || !profile.galerie_paths().is_empty();

        !description.trim().is_empty() && has_photo && has_galerie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_profile() -> Model {
        Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description_artisan: String::new(),
            boutique_id: None,
            statut: ArtisanStatus::EnAttente,
            departement: "Atlantique".to_string(),
            ville: "Cotonou".to_string(),
            note_moyenne: 0.0,
            nombre_avis: 0,
            photo_profil: None,
            demande_timbre: Some("docs/timbre.pdf".to_string()),
            attestation_enregistrement: Some("docs/attestation.pdf".to_string()),
            photos_produits: Some("docs/photos.jpg".to_string()),
            plan_localisation: Some("docs/plan.pdf".to_string()),
            copie_cni: Some("docs/cni.jpg".to_string()),
            qr_code: None,
            profil_complet: false,
            facebook: None,
            instagram: None,
            whatsapp: None,
            opening_hours: None,
            galerie: serde_json::json!([]),
            latitude: None,
            longitude: None,
            date_inscription: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_update_filling_every_gap_completes_the_profile() {
        let profile = bare_profile();
        let update = ArtisanProfileUpdate {
            description_artisan: Some("Poterie traditionnelle".to_string()),
            photo_profil: Some("photos/profil.jpg".to_string()),
            galerie_append: vec!["galerie/atelier.jpg".to_string()],
            ..Default::default()
        };

        assert!(update.completeness_after(&profile));
    }

    #[test]
    fn test_blanking_the_description_breaks_completeness() {
        let mut profile = bare_profile();
        profile.description_artisan = "Tissage".to_string();
        profile.photo_profil = Some("photos/profil.jpg".to_string());
        profile.galerie = serde_json::json!(["galerie/atelier.jpg"]);
        profile.profil_complet = true;

        let update = ArtisanProfileUpdate {
            description_artisan: Some("   ".to_string()),
            ..Default::default()
        };

        assert!(!update.completeness_after(&profile));
    }

    #[test]
    fn test_untouched_fields_count_towards_completeness() {
        let mut profile = bare_profile();
        profile.description_artisan = "Vannerie".to_string();
        profile.photo_profil = Some("photos/profil.jpg".to_string());
        profile.galerie = serde_json::json!(["galerie/panier.jpg"]);

        // A no-op update leaves a complete profile complete, and a gallery
        // append alone cannot complete a profile missing its photo.
        assert!(ArtisanProfileUpdate::default().completeness_after(&profile));

        profile.photo_profil = None;
        let update = ArtisanProfileUpdate {
            galerie_append: vec!["galerie/autre.jpg".to_string()],
            ..Default::default()
        };
        assert!(!update.completeness_after(&profile));
    }
}
