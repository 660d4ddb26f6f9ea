use actix_web::{HttpResponse, Responder, web};
use rand::Rng;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{jwt, password};
use crate::cache::{RedisCache, VERIFICATION_CODE_TTL_SECS, keys};
use crate::db::artisans as artisan_db;
use crate::db::users as user_db;
use crate::email::Mailer;
use crate::models::users::{LoginRequest, RegisterUser, Role, UserResponse};

#[derive(Debug, Deserialize)]
pub struct CheckEmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// POST /api/register — create a client account and log it in.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterUser>,
) -> impl Responder {
    let mut input = body.into_inner();
    // Self-registration only ever creates clients; artisan accounts go
    // through the onboarding submission and admins through the console.
    input.role = Some(Role::Client);

    match user_db::get_user_by_email(db.get_ref(), &input.email).await {
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

    let hash = match password::hash_password(&input.password) {
        Ok(h) => h,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to hash password: {e}"),
            }));
        }
    };

    match user_db::insert_user(db.get_ref(), input, hash).await {
        Ok(user) => match jwt::generate_token_pair(&user) {
            Ok(tokens) => HttpResponse::Created().json(serde_json::json!({
                "access": tokens.access,
                "refresh": tokens.refresh,
                "user": UserResponse::from(user),
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e,
            })),
        },
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create user: {e}"),
        })),
    }
}

/// POST /api/login — verify credentials, return an access+refresh pair.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let user = match user_db::get_user_by_email(db.get_ref(), &body.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Identifiants invalides",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match password::verify_password(&body.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) | Err(_) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Identifiants invalides",
            }));
        }
    }

    if !user.is_active {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Compte inactif",
        }));
    }

    match jwt::generate_token_pair(&user) {
        Ok(tokens) => HttpResponse::Ok().json(serde_json::json!({
            "access": tokens.access,
            "refresh": tokens.refresh,
            "user": UserResponse::from(user),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e,
        })),
    }
}

/// GET /api/check-email?email= — whether the email already belongs to an
/// artisan account (used by the onboarding form before submission).
pub async fn check_email(
    db: web::Data<DatabaseConnection>,
    query: web::Query<CheckEmailQuery>,
) -> impl Responder {
    let user = match user_db::get_user_by_email(db.get_ref(), &query.email).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let exists = match user {
        Some(user) => match artisan_db::get_artisan_by_user_id(db.get_ref(), user.id).await {
            Ok(profile) => profile.is_some(),
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        },
        None => false,
    };

    HttpResponse::Ok().json(serde_json::json!({ "exists": exists }))
}

/// POST /api/send-verification-code — six-digit code held in Redis for ten
/// minutes and mailed to the address.
pub async fn send_verification_code(
    cache: web::Data<RedisCache>,
    mailer: web::Data<Arc<dyn Mailer>>,
    body: web::Json<SendCodeRequest>,
) -> impl Responder {
    let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    let code = code.to_string();

    if let Err(e) = cache
        .set(
            &keys::verification_code(&body.email),
            &code,
            Some(VERIFICATION_CODE_TTL_SECS),
        )
        .await
    {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to store verification code: {e}"),
        }));
    }

    let message = format!(
        "Votre code de vérification est : {code}\n\nIl expire dans 10 minutes."
    );

    match mailer
        .send(&body.email, "Code de vérification", message, None)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Code envoyé",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to send verification code: {e}"),
        })),
    }
}

/// POST /api/contact — relay a contact-form message to the admin inbox.
pub async fn contact(
    mailer: web::Data<Arc<dyn Mailer>>,
    body: web::Json<ContactRequest>,
) -> impl Responder {
    let admin_email = match std::env::var("ADMIN_EMAIL") {
        Ok(v) => v,
        Err(_) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "ADMIN_EMAIL not configured",
            }));
        }
    };

    let subject = body
        .subject
        .clone()
        .unwrap_or_else(|| "Nouveau message de contact".to_string());
    let message = format!(
        "De : {} <{}>\n\n{}",
        body.name, body.email, body.message
    );

    match mailer.send(&admin_email, &subject, message, None).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Message envoyé",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to send message: {e}"),
        })),
    }
}
