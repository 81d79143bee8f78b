pub mod mailer;
pub mod sheets;
