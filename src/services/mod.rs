/// Business logic layer
pub mod email;
pub mod notifications;
pub mod otp;

pub use email::{EmailService, Mailer};
pub use notifications::NotificationService;
pub use otp::OtpService;
