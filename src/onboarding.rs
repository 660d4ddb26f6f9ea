//! Artisan onboarding workflow: submission checks, validation side effects
//! (QR code + email) and rejection.

use hmac::{Hmac, Mac};
use sea_orm::{DatabaseConnection, DbErr};
use sha2::Sha256;
use tracing::warn;
use uuid::Uuid;

use crate::auth::jwt::jwt_secret;
use crate::db;
use crate::email::{EmailAttachment, Mailer};
use crate::models::artisans::{self, ArtisanStatus};
use crate::qr;
use crate::storage::BlobStore;

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Documents manquants: {}", .0.join(", "))]
    MissingDocuments(Vec<&'static str>),
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Qr(#[from] qr::QrError),
    #[error("blob storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Presence flags for the five mandatory onboarding documents.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SubmittedDocuments {
    pub demande_timbre: bool,
    pub attestation_enregistrement: bool,
    pub photos_produits: bool,
    pub plan_localisation: bool,
    pub copie_cni: bool,
}

impl SubmittedDocuments {
    /// Names of the documents still missing, in a fixed order so error
    /// messages are stable.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.demande_timbre {
            missing.push("demande_timbre");
        }
        if !self.attestation_enregistrement {
            missing.push("attestation_enregistrement");
        }
        if !self.photos_produits {
            missing.push("photos_produits");
        }
        if !self.plan_localisation {
            missing.push("plan_localisation");
        }
        if !self.copie_cni {
            missing.push("copie_cni");
        }
        missing
    }

    pub fn from_profile(profile: &artisans::Model) -> Self {
        Self {
            demande_timbre: profile.demande_timbre.is_some(),
            attestation_enregistrement: profile.attestation_enregistrement.is_some(),
            photos_produits: profile.photos_produits.is_some(),
            plan_localisation: profile.plan_localisation.is_some(),
            copie_cni: profile.copie_cni.is_some(),
        }
    }
}

type HmacSha256 = Hmac<Sha256>;

/// Deterministic mobile-login token for an artisan, derived from the
/// signing secret. Re-validating an artisan always yields the same token.
pub fn login_token(artisan_id: Uuid) -> String {
    login_token_with_secret(artisan_id, &jwt_secret())
}

fn login_token_with_secret(artisan_id: Uuid, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(artisan_id.as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

fn public_base_url() -> String {
    std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// The URL embedded in the QR code and sent in the validation email.
pub fn verification_url(artisan_id: Uuid) -> String {
    format!(
        "{}/artisan/mobile-login?artisan_id={}&token={}",
        public_base_url(),
        artisan_id,
        login_token(artisan_id)
    )
}

/// Validate an artisan. Status and QR code path are persisted first; the
/// email dispatch happens after and its failure never rolls back the
/// validation.
pub async fn validate(
    db: &DatabaseConnection,
    blobs: &BlobStore,
    mailer: &dyn Mailer,
    profile: artisans::Model,
    artisan_email: &str,
) -> Result<artisans::Model, OnboardingError> {
    let url = verification_url(profile.id);
    let png = qr::render_png(&url)?;
    let qr_path = blobs.save_bytes("qr_codes", &format!("qr_{}.png", profile.id), &png)?;

    let updated = db::artisans::mark_validated(db, profile, qr_path).await?;

    send_validation_email(mailer, artisan_email, &url, png).await;

    Ok(updated)
}

/// Reject an artisan: flip to `suspendu`. Already-suspended profiles are
/// re-flagged without error.
pub async fn reject(
    db: &DatabaseConnection,
    profile: artisans::Model,
) -> Result<artisans::Model, OnboardingError> {
    Ok(db::artisans::set_status(db, profile, ArtisanStatus::Suspendu).await?)
}

/// Best-effort dispatch of the validation email. Failures are logged and
/// swallowed so a broken SMTP relay cannot block validation.
pub async fn send_validation_email(
    mailer: &dyn Mailer,
    to: &str,
    verification_url: &str,
    qr_png: Vec<u8>,
) {
    let body = format!(
        "Bonjour,\n\n\
         Votre compte artisan a été validé. Vous pouvez maintenant vous connecter \
         à l'application mobile en scannant le QR code ci-joint, ou via ce lien :\n\n\
         {verification_url}\n\n\
         L'équipe Artizone"
    );

    let attachment = EmailAttachment {
        filename: "qr_code.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: qr_png,
    };

    if let Err(err) = mailer
        .send(to, "Votre compte artisan a été validé", body, Some(attachment))
        .await
    {
        warn!("validation email to {to} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::MailError;
    use async_trait::async_trait;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn profile_with_status(id: Uuid, statut: ArtisanStatus) -> artisans::Model {
        artisans::Model {
            id,
            user_id: Uuid::new_v4(),
            description_artisan: "Sculpture sur bois".to_string(),
            boutique_id: None,
            statut,
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

    #[tokio::test]
    async fn rejecting_twice_succeeds_and_stays_suspended() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![profile_with_status(id, ArtisanStatus::Suspendu)],
                vec![profile_with_status(id, ArtisanStatus::Suspendu)],
            ])
            .into_connection();

        let pending = profile_with_status(id, ArtisanStatus::EnAttente);
        let first = reject(&db, pending).await.unwrap();
        assert_eq!(first.statut, ArtisanStatus::Suspendu);

        let second = reject(&db, first).await.unwrap();
        assert_eq!(second.statut, ArtisanStatus::Suspendu);
    }

    #[test]
    fn missing_documents_are_itemized_in_order() {
        let docs = SubmittedDocuments {
            demande_timbre: true,
            attestation_enregistrement: false,
            photos_produits: true,
            plan_localisation: false,
            copie_cni: false,
        };
        assert_eq!(
            docs.missing(),
            vec!["attestation_enregistrement", "plan_localisation", "copie_cni"]
        );

        let complete = SubmittedDocuments {
            demande_timbre: true,
            attestation_enregistrement: true,
            photos_produits: true,
            plan_localisation: true,
            copie_cni: true,
        };
        assert!(complete.missing().is_empty());
    }

    #[test]
    fn login_token_is_deterministic_per_artisan() {
        let id = Uuid::new_v4();
        let a = login_token_with_secret(id, "secret");
        let b = login_token_with_secret(id, "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        let other = login_token_with_secret(Uuid::new_v4(), "secret");
        assert_ne!(a, other);

        let other_secret = login_token_with_secret(id, "different");
        assert_ne!(a, other_secret);
    }

    struct FailingMailer;

    #[async_trait]
    impl Mailer for FailingMailer {
        async fn send(
            &self,
            _to: &str,
            _subject: &str,
            _body: String,
            _attachment: Option<EmailAttachment>,
        ) -> Result<(), MailError> {
            Err(MailError::Config("no smtp in tests".into()))
        }
    }

    #[tokio::test]
    async fn validation_email_failure_is_swallowed() {
        send_validation_email(
            &FailingMailer,
            "artisan@example.com",
            "http://localhost:8080/artisan/mobile-login?artisan_id=x&token=y",
            vec![1, 2, 3],
        )
        .await;
    }
}
