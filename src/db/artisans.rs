use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::artisans::{
    self, ArtisanListQuery, ArtisanProfileUpdate, ArtisanStatus, ArtisanSubmission,
};
use crate::models::users::{self, Role};

/// Create the artisan account and its profile atomically. Either both rows
/// exist afterwards, or neither does. When the email already belongs to a
/// user without a profile, that user is reused untouched; new accounts
/// start inactive until validation.
pub async fn submit_artisan(
    db: &DatabaseConnection,
    submission: ArtisanSubmission,
    existing_user: Option<users::Model>,
) -> Result<(users::Model, artisans::Model), DbErr> {
    let txn = db.begin().await?;

    let user = match existing_user {
        Some(user) => user,
        None => {
            users::ActiveModel {
                id: Set(Uuid::new_v4()),
                email: Set(submission.email),
                nom: Set(submission.nom),
                prenom: Set(submission.prenom),
                telephone: Set(submission.telephone),
                role: Set(Role::Artisan),
                is_active: Set(false),
                is_staff: Set(false),
                password_hash: Set(submission.password_hash),
                date_joined: Set(chrono::Utc::now()),
            }
            .insert(&txn)
            .await?
        }
    };

    let profil_complet = !submission.description_artisan.trim().is_empty()
        && submission.photo_profil.is_some()
        && !submission.galerie.is_empty();

    let profile = artisans::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        description_artisan: Set(submission.description_artisan),
        boutique_id: Set(submission.boutique_id),
        statut: Set(ArtisanStatus::EnAttente),
        departement: Set(submission.departement),
        ville: Set(submission.ville),
        note_moyenne: Set(0.0),
        nombre_avis: Set(0),
        photo_profil: Set(submission.photo_profil),
        demande_timbre: Set(Some(submission.demande_timbre)),
        attestation_enregistrement: Set(Some(submission.attestation_enregistrement)),
        photos_produits: Set(Some(submission.photos_produits)),
        plan_localisation: Set(Some(submission.plan_localisation)),
        copie_cni: Set(Some(submission.copie_cni)),
        qr_code: Set(None),
        profil_complet: Set(profil_complet),
        facebook: Set(submission.facebook),
        instagram: Set(submission.instagram),
        whatsapp: Set(submission.whatsapp),
        opening_hours: Set(submission.opening_hours),
        galerie: Set(serde_json::json!(submission.galerie)),
        latitude: Set(submission.latitude),
        longitude: Set(submission.longitude),
        date_inscription: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok((user, profile))
}

/// Admin listing with filters on the profile and the owning user.
pub async fn get_artisans_filtered(
    db: &DatabaseConnection,
    query: &ArtisanListQuery,
) -> Result<Vec<(artisans::Model, Option<users::Model>)>, DbErr> {
    let mut find = artisans::Entity::find().find_also_related(users::Entity);

    if let Some(statut) = query
        .statut
        .as_deref()
        .and_then(|s| ArtisanStatus::try_from_value(&s.to_string()).ok())
    {
        find = find.filter(artisans::Column::Statut.eq(statut));
    }
    if let Some(departement) = query.departement.as_deref().filter(|d| !d.is_empty()) {
        find = find.filter(
            Expr::col((artisans::Entity, artisans::Column::Departement))
                .ilike(format!("%{departement}%")),
        );
    }
    if let Some(nom) = query.nom.as_deref().filter(|n| !n.is_empty()) {
        let pattern = format!("%{nom}%");
        find = find.filter(
            Condition::any()
                .add(Expr::col((users::Entity, users::Column::Nom)).ilike(pattern.clone()))
                .add(Expr::col((users::Entity, users::Column::Prenom)).ilike(pattern)),
        );
    }
    if let Some(email) = query.email.as_deref().filter(|e| !e.is_empty()) {
        find = find
            .filter(Expr::col((users::Entity, users::Column::Email)).ilike(format!("%{email}%")));
    }

    find.order_by_desc(artisans::Column::DateInscription)
        .all(db)
        .await
}

pub async fn get_artisan_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<(artisans::Model, Option<users::Model>)>, DbErr> {
    artisans::Entity::find_by_id(id)
        .find_also_related(users::Entity)
        .one(db)
        .await
}

pub async fn get_artisan_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<artisans::Model>, DbErr> {
    artisans::Entity::find()
        .filter(artisans::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Shop lookup: exact `boutique_id` match first; otherwise a slug-style
/// `shop_name` where hyphens stand in for spaces, matched as a substring.
pub async fn find_by_shop(
    db: &DatabaseConnection,
    boutique_id: Option<&str>,
    shop_name: Option<&str>,
) -> Result<Option<(artisans::Model, Option<users::Model>)>, DbErr> {
    if let Some(boutique_id) = boutique_id.filter(|b| !b.is_empty()) {
        return artisans::Entity::find()
            .filter(Expr::col((artisans::Entity, artisans::Column::BoutiqueId)).ilike(boutique_id))
            .find_also_related(users::Entity)
            .one(db)
            .await;
    }

    let Some(shop_name) = shop_name.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Some(found) = artisans::Entity::find()
        .filter(Expr::col((artisans::Entity, artisans::Column::BoutiqueId)).ilike(shop_name))
        .find_also_related(users::Entity)
        .one(db)
        .await?
    {
        return Ok(Some(found));
    }

    let unslugged = shop_name.replace('-', " ");
    artisans::Entity::find()
        .filter(
            Expr::col((artisans::Entity, artisans::Column::BoutiqueId))
                .ilike(format!("%{unslugged}%")),
        )
        .find_also_related(users::Entity)
        .one(db)
        .await
}

pub async fn set_status(
    db: &DatabaseConnection,
    profile: artisans::Model,
    statut: ArtisanStatus,
) -> Result<artisans::Model, DbErr> {
    let mut active: artisans::ActiveModel = profile.into();
    active.statut = Set(statut);
    active.update(db).await
}

/// Validation persists the new status and the QR code path, and activates
/// the owning user account, in one transaction.
pub async fn mark_validated(
    db: &DatabaseConnection,
    profile: artisans::Model,
    qr_code: String,
) -> Result<artisans::Model, DbErr> {
    let txn = db.begin().await?;

    let user_id = profile.user_id;
    let mut active: artisans::ActiveModel = profile.into();
    active.statut = Set(ArtisanStatus::Valide);
    active.qr_code = Set(Some(qr_code));
    let updated = active.update(&txn).await?;

    users::Entity::update_many()
        .col_expr(users::Column::IsActive, Expr::value(true))
        .filter(users::Column::Id.eq(user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(updated)
}

/// Bulk status flip. Deliberately status-only: no QR, no email, no other
/// side effects, unlike the single-artisan validation.
pub async fn set_status_bulk(
    db: &DatabaseConnection,
    ids: &[Uuid],
    statut: ArtisanStatus,
) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = artisans::Entity::update_many()
        .col_expr(artisans::Column::Statut, Expr::value(statut))
        .filter(artisans::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Self-service profile edit. Gallery entries are appended, and
/// `profil_complet` is recomputed from the merged values and persisted in
/// the same UPDATE as the rest of the changes.
pub async fn update_profile(
    db: &DatabaseConnection,
    profile: artisans::Model,
    update: ArtisanProfileUpdate,
) -> Result<artisans::Model, DbErr> {
    let profil_complet = update.completeness_after(&profile);

    let mut galerie = profile.galerie_paths();
    galerie.extend(update.galerie_append);

    let mut active: artisans::ActiveModel = profile.into();

    if let Some(description) = update.description_artisan {
        active.description_artisan = Set(description);
    }
    if let Some(boutique_id) = update.boutique_id {
        active.boutique_id = Set(Some(boutique_id));
    }
    if let Some(departement) = update.departement {
        active.departement = Set(departement);
    }
    if let Some(ville) = update.ville {
        active.ville = Set(ville);
    }
    if let Some(photo) = update.photo_profil {
        active.photo_profil = Set(Some(photo));
    }
    if let Some(facebook) = update.facebook {
        active.facebook = Set(Some(facebook));
    }
    if let Some(instagram) = update.instagram {
        active.instagram = Set(Some(instagram));
    }
    if let Some(whatsapp) = update.whatsapp {
        active.whatsapp = Set(Some(whatsapp));
    }
    if let Some(opening_hours) = update.opening_hours {
        active.opening_hours = Set(Some(opening_hours));
    }
    if let Some(latitude) = update.latitude {
        active.latitude = Set(Some(latitude));
    }
    if let Some(longitude) = update.longitude {
        active.longitude = Set(Some(longitude));
    }
    active.galerie = Set(serde_json::json!(galerie));
    active.profil_complet = Set(profil_complet);

    active.update(db).await
}

pub async fn count_by_status(
    db: &DatabaseConnection,
    statut: ArtisanStatus,
) -> Result<u64, DbErr> {
    artisans::Entity::find()
        .filter(artisans::Column::Statut.eq(statut))
        .count(db)
        .await
}

pub async fn count_artisans(db: &DatabaseConnection) -> Result<u64, DbErr> {
    artisans::Entity::find().count(db).await
}
