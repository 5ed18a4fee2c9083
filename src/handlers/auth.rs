/// Authentication handlers - OTP issuance and verification
use crate::error::Result;
use crate::services::{Mailer, OtpService};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// Register a new account and email it an OTP
pub async fn send_otp(
    pool: web::Data<PgPool>,
    mailer: web::Data<dyn Mailer>,
    req: web::Json<SendOtpRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = OtpService::new((**pool).clone(), mailer.into_inner());
    service.send_otp(&req.name, &req.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "OTP sent to your email".to_string(),
    }))
}

/// Verify an issued OTP and return the account id
pub async fn verify_otp(
    pool: web::Data<PgPool>,
    mailer: web::Data<dyn Mailer>,
    req: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse> {
    let service = OtpService::new((**pool).clone(), mailer.into_inner());
    let user_id = service.verify_otp(&req.email, &req.otp).await?;

    Ok(HttpResponse::Ok().json(VerifyOtpResponse {
        message: "OTP verified successfully".to_string(),
        user_id,
    }))
}
