/// OTP issuance and verification
///
/// Issues a 6-digit numeric passcode per new account, emails it, and
/// verifies it against the stored user row. A code is single-use:
/// successful verification clears it.
use crate::db;
use crate::error::{AppError, Result};
use crate::services::email::Mailer;
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// OTP code length
const OTP_LENGTH: usize = 6;

pub struct OtpService {
    pool: PgPool,
    mailer: Arc<dyn Mailer>,
}

impl OtpService {
    pub fn new(pool: PgPool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Issue an OTP to a new account and email it.
    ///
    /// Fails with `Conflict` when the email is already registered. The
    /// user row persists even when the subsequent email send fails.
    pub async fn send_otp(&self, name: &str, email: &str) -> Result<()> {
        if db::users::find_by_email(&self.pool, email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let otp = generate_otp();
        let user = db::users::create_user(&self.pool, name, email, &otp).await?;

        self.mailer
            .send(email, "OTP Verification", &format!("Your OTP is: {}", otp))
            .await?;

        info!(user_id = %user.id, "OTP issued");
        Ok(())
    }

    /// Verify an OTP by exact (email, otp) match.
    ///
    /// Wrong code and unknown email are indistinguishable to the
    /// caller. On success the stored code is cleared, so replaying the
    /// same pair fails.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<Uuid> {
        let user = db::users::find_by_email_and_otp(&self.pool, email, otp)
            .await?
            .ok_or(AppError::Unauthorized)?;

        db::users::clear_otp(&self.pool, user.id).await?;

        info!(user_id = %user.id, "OTP verified");
        Ok(user.id)
    }
}

/// Generate a random 6-digit numeric code; leading zeros allowed.
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    (0..OTP_LENGTH)
        .map(|_| rng.gen_range(0..10).to_string())
        .collect()
}
