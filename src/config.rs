use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub google_sheet_id: String,
    pub google_client_email: String,
    pub google_private_key: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub email_user: String,
    pub email_pass: String,
    pub admin_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "bookline.db".to_string()),
            google_sheet_id: env::var("GOOGLE_SHEET_ID").unwrap_or_default(),
            google_client_email: env::var("GOOGLE_CLIENT_EMAIL").unwrap_or_default(),
            // Key material pasted into env files often carries escaped newlines.
            google_private_key: env::var("GOOGLE_PRIVATE_KEY")
                .unwrap_or_default()
                .replace("\\n", "\n"),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            email_user: env::var("EMAIL_USER").unwrap_or_default(),
            email_pass: env::var("EMAIL_PASS").unwrap_or_default(),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_default(),
        }
    }
}
