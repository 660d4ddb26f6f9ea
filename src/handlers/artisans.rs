use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, require_admin};
use crate::auth::password;
use crate::db::artisans as artisan_db;
use crate::db::users as user_db;
use crate::email::Mailer;
use crate::models::artisans::{
    ArtisanListQuery, ArtisanProfileUpdate, ArtisanResponse, ArtisanSubmission, ShopLookupQuery,
};
use crate::models::users::Role;
use crate::onboarding::{self, SubmittedDocuments};
use crate::storage::BlobStore;

/// Senegal: 14 regions on paper, 13 with artisan chambers; 91 departements
/// served. Surfaced as-is on the stats endpoint for the admin dashboard.
const REGION_COUNT: u32 = 13;
const DEPARTEMENT_COUNT: u32 = 91;

/// Multipart body of `POST /api/artisans`.
#[derive(MultipartForm)]
pub struct SubmitArtisanForm {
    pub email: Text<String>,
    pub nom: Text<String>,
    pub prenom: Text<String>,
    pub telephone: Text<String>,
    pub password: Text<String>,
    pub description_artisan: Option<Text<String>>,
    pub boutique_id: Option<Text<String>>,
    pub departement: Text<String>,
    pub ville: Text<String>,
    pub facebook: Option<Text<String>>,
    pub instagram: Option<Text<String>>,
    pub whatsapp: Option<Text<String>>,
    pub opening_hours: Option<Text<String>>,
    pub latitude: Option<Text<f64>>,
    pub longitude: Option<Text<f64>>,
    pub photo_profil: Option<TempFile>,
    pub demande_timbre: Option<TempFile>,
    pub attestation_enregistrement: Option<TempFile>,
    pub photos_produits: Option<TempFile>,
    pub plan_localisation: Option<TempFile>,
    pub copie_cni: Option<TempFile>,
    #[multipart(rename = "galerie")]
    pub galerie: Vec<TempFile>,
}

/// Multipart body of `PATCH /api/artisans/{id}`. Gallery files are appended
/// to the existing gallery.
#[derive(MultipartForm)]
pub struct UpdateArtisanForm {
    pub description_artisan: Option<Text<String>>,
    pub boutique_id: Option<Text<String>>,
    pub departement: Option<Text<String>>,
    pub ville: Option<Text<String>>,
    pub facebook: Option<Text<String>>,
    pub instagram: Option<Text<String>>,
    pub whatsapp: Option<Text<String>>,
    pub opening_hours: Option<Text<String>>,
    pub latitude: Option<Text<f64>>,
    pub longitude: Option<Text<f64>>,
    pub photo_profil: Option<TempFile>,
    #[multipart(rename = "galerie")]
    pub galerie: Vec<TempFile>,
}

/// GET /api/artisans — list with nom/email/statut/departement filters.
pub async fn get_artisans(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ArtisanListQuery>,
) -> impl Responder {
    match artisan_db::get_artisans_filtered(db.get_ref(), &query).await {
        Ok(rows) => {
            let artisans: Vec<ArtisanResponse> = rows
                .into_iter()
                .filter_map(|(profile, user)| user.map(|u| ArtisanResponse::new(profile, u)))
                .collect();
            HttpResponse::Ok().json(artisans)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch artisans: {e}"),
        })),
    }
}

/// GET /api/artisans/stats — dashboard counters (admin only).
pub async fn get_stats(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    use crate::models::artisans::ArtisanStatus;

    let total = artisan_db::count_artisans(db.get_ref()).await;
    let en_attente = artisan_db::count_by_status(db.get_ref(), ArtisanStatus::EnAttente).await;
    let valide = artisan_db::count_by_status(db.get_ref(), ArtisanStatus::Valide).await;
    let suspendu = artisan_db::count_by_status(db.get_ref(), ArtisanStatus::Suspendu).await;

    match (total, en_attente, valide, suspendu) {
        (Ok(total), Ok(en_attente), Ok(valide), Ok(suspendu)) => {
            HttpResponse::Ok().json(serde_json::json!({
                "total": total,
                "en_attente": en_attente,
                "valide": valide,
                "suspendu": suspendu,
                "regions": REGION_COUNT,
                "departements": DEPARTEMENT_COUNT,
            }))
        }
        _ => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": "Failed to compute artisan stats",
        })),
    }
}

/// GET /api/artisans/{id}
pub async fn get_artisan(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match artisan_db::get_artisan_by_id(db.get_ref(), id).await {
        Ok(Some((profile, Some(user)))) => {
            HttpResponse::Ok().json(ArtisanResponse::new(profile, user))
        }
        Ok(Some((_, None))) | Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Artisan {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/artisans — multipart onboarding submission. All five documents
/// are mandatory; an existing user without a profile is reused untouched.
pub async fn submit_artisan(
    db: web::Data<DatabaseConnection>,
    blobs: web::Data<BlobStore>,
    MultipartForm(form): MultipartForm<SubmitArtisanForm>,
) -> impl Responder {
    let (
        Some(demande_timbre_file),
        Some(attestation_file),
        Some(photos_produits_file),
        Some(plan_localisation_file),
        Some(copie_cni_file),
    ) = (
        form.demande_timbre.as_ref(),
        form.attestation_enregistrement.as_ref(),
        form.photos_produits.as_ref(),
        form.plan_localisation.as_ref(),
        form.copie_cni.as_ref(),
    )
    else {
        let missing = SubmittedDocuments {
            demande_timbre: form.demande_timbre.is_some(),
            attestation_enregistrement: form.attestation_enregistrement.is_some(),
            photos_produits: form.photos_produits.is_some(),
            plan_localisation: form.plan_localisation.is_some(),
            copie_cni: form.copie_cni.is_some(),
        }
        .missing();
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Documents manquants: {}", missing.join(", ")),
        }));
    };

    let existing_user = match user_db::get_user_by_email(db.get_ref(), &form.email).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if let Some(user) = &existing_user {
        match artisan_db::get_artisan_by_user_id(db.get_ref(), user.id).await {
            Ok(Some(_)) => {
                return HttpResponse::Conflict().json(serde_json::json!({
                    "error": "Email déjà utilisé",
                }));
            }
            Ok(None) => {}
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    let saved = (|| -> std::io::Result<[String; 5]> {
        Ok([
            blobs.save_temp("documents", demande_timbre_file)?,
            blobs.save_temp("documents", attestation_file)?,
            blobs.save_temp("documents", photos_produits_file)?,
            blobs.save_temp("documents", plan_localisation_file)?,
            blobs.save_temp("documents", copie_cni_file)?,
        ])
    })();
    let [demande_timbre, attestation_enregistrement, photos_produits, plan_localisation, copie_cni] =
        match saved {
            Ok(paths) => paths,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to store documents: {e}"),
                }));
            }
        };

    let photo_profil = match &form.photo_profil {
        Some(file) => match blobs.save_temp("photos", file) {
            Ok(path) => Some(path),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to store profile photo: {e}"),
                }));
            }
        },
        None => None,
    };

    let mut galerie = Vec::with_capacity(form.galerie.len());
    for file in &form.galerie {
        match blobs.save_temp("galerie", file) {
            Ok(path) => galerie.push(path),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to store gallery image: {e}"),
                }));
            }
        }
    }

    let password_hash = match password::hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {e}"),
            }));
        }
    };

    let submission = ArtisanSubmission {
        email: form.email.into_inner(),
        nom: form.nom.into_inner(),
        prenom: form.prenom.into_inner(),
        telephone: form.telephone.into_inner(),
        password_hash,
        description_artisan: form
            .description_artisan
            .map(Text::into_inner)
            .unwrap_or_default(),
        boutique_id: form.boutique_id.map(Text::into_inner),
        departement: form.departement.into_inner(),
        ville: form.ville.into_inner(),
        photo_profil,
        demande_timbre,
        attestation_enregistrement,
        photos_produits,
        plan_localisation,
        copie_cni,
        facebook: form.facebook.map(Text::into_inner),
        instagram: form.instagram.map(Text::into_inner),
        whatsapp: form.whatsapp.map(Text::into_inner),
        opening_hours: form.opening_hours.map(Text::into_inner),
        galerie,
        latitude: form.latitude.map(Text::into_inner),
        longitude: form.longitude.map(Text::into_inner),
    };

    match artisan_db::submit_artisan(db.get_ref(), submission, existing_user).await {
        Ok((user, profile)) => HttpResponse::Created().json(ArtisanResponse::new(profile, user)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create artisan: {e}"),
        })),
    }
}

/// PATCH /api/artisans/{id} — self-service profile update (owner or admin).
pub async fn update_artisan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    blobs: web::Data<BlobStore>,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<UpdateArtisanForm>,
) -> impl Responder {
    let id = path.into_inner();
    let (profile, owner) = match artisan_db::get_artisan_by_id(db.get_ref(), id).await {
        Ok(Some((profile, Some(owner)))) => (profile, owner),
        Ok(Some((_, None))) | Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Artisan {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if user.0.id != owner.id && user.0.role != Role::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only update your own profile",
        }));
    }

    let photo_profil = match &form.photo_profil {
        Some(file) => match blobs.save_temp("photos", file) {
            Ok(path) => Some(path),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to store profile photo: {e}"),
                }));
            }
        },
        None => None,
    };

    let mut galerie_append = Vec::with_capacity(form.galerie.len());
    for file in &form.galerie {
        match blobs.save_temp("galerie", file) {
            Ok(path) => galerie_append.push(path),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to store gallery image: {e}"),
                }));
            }
        }
    }

    let update = ArtisanProfileUpdate {
        description_artisan: form.description_artisan.map(Text::into_inner),
        boutique_id: form.boutique_id.map(Text::into_inner),
        departement: form.departement.map(Text::into_inner),
        ville: form.ville.map(Text::into_inner),
        photo_profil,
        facebook: form.facebook.map(Text::into_inner),
        instagram: form.instagram.map(Text::into_inner),
        whatsapp: form.whatsapp.map(Text::into_inner),
        opening_hours: form.opening_hours.map(Text::into_inner),
        galerie_append,
        latitude: form.latitude.map(Text::into_inner),
        longitude: form.longitude.map(Text::into_inner),
    };

    match artisan_db::update_profile(db.get_ref(), profile, update).await {
        Ok(updated) => HttpResponse::Ok().json(ArtisanResponse::new(updated, owner)),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update artisan: {e}"),
        })),
    }
}

/// POST /api/artisans/{id}/validate — admin validation with QR + email side
/// effects. The status flip and QR are durable even if the email fails.
pub async fn validate_artisan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    blobs: web::Data<BlobStore>,
    mailer: web::Data<Arc<dyn Mailer>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    let (profile, owner) = match artisan_db::get_artisan_by_id(db.get_ref(), id).await {
        Ok(Some((profile, Some(owner)))) => (profile, owner),
        Ok(Some((_, None))) | Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Artisan {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match onboarding::validate(
        db.get_ref(),
        blobs.get_ref(),
        mailer.get_ref().as_ref(),
        profile,
        &owner.email,
    )
    .await
    {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Artisan validé",
            "artisan": ArtisanResponse::new(updated, owner),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to validate artisan: {e}"),
        })),
    }
}

/// POST /api/artisans/{id}/reject — admin rejection; idempotent on
/// already-suspended profiles.
pub async fn reject_artisan(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(forbidden) = require_admin(&user.0) {
        return forbidden;
    }

    let id = path.into_inner();
    let profile = match artisan_db::get_artisan_by_id(db.get_ref(), id).await {
        Ok(Some((profile, _))) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Artisan {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match onboarding::reject(db.get_ref(), profile).await {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Artisan rejeté",
            "artisan": updated,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to reject artisan: {e}"),
        })),
    }
}

/// GET /api/artisan-by-shop?boutique_id=|shop_name= — exact match first,
/// then the slug-style fuzzy fallback.
pub async fn get_artisan_by_shop(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ShopLookupQuery>,
) -> impl Responder {
    let has_boutique_id = query
        .boutique_id
        .as_deref()
        .is_some_and(|b| !b.is_empty());
    let has_shop_name = query.shop_name.as_deref().is_some_and(|s| !s.is_empty());
    if !has_boutique_id && !has_shop_name {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "boutique_id ou shop_name requis",
        }));
    }

    match artisan_db::find_by_shop(
        db.get_ref(),
        query.boutique_id.as_deref(),
        query.shop_name.as_deref(),
    )
    .await
    {
        Ok(Some((profile, Some(user)))) => {
            HttpResponse::Ok().json(ArtisanResponse::new(profile, user))
        }
        Ok(Some((_, None))) | Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Boutique introuvable",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[actix_web::test]
    async fn shop_lookup_without_parameters_is_a_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .route("/artisan-by-shop", web::get().to(get_artisan_by_shop)),
        )
        .await;

        let req = test::TestRequest::get().uri("/artisan-by-shop").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/artisan-by-shop?boutique_id=&shop_name=")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
