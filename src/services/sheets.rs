use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::models::Booking;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[async_trait]
pub trait SheetMirror: Send + Sync {
    async fn append(&self, booking: &Booking) -> anyhow::Result<()>;
}

/// One spreadsheet row per booking. Column order is fixed: call-time
/// timestamp, name, email, phone, service, style, date, time, message.
pub fn sheet_row(booking: &Booking) -> Vec<String> {
    vec![
        Utc::now().to_rfc3339(),
        booking.name.clone(),
        booking.email.clone(),
        booking.phone.clone(),
        booking.service.as_str().to_string(),
        booking.style.clone(),
        booking.date.clone(),
        booking.time.clone(),
        booking.message.clone(),
    ]
}

pub struct GoogleSheetsMirror {
    sheet_id: String,
    client_email: String,
    private_key_pem: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleSheetsMirror {
    pub fn new(sheet_id: String, client_email: String, private_key_pem: String) -> Self {
        Self {
            sheet_id,
            client_email,
            private_key_pem,
            client: reqwest::Client::new(),
        }
    }

    /// Exchanges a signed service-account JWT for a short-lived bearer token.
    async fn access_token(&self) -> anyhow::Result<String> {
        let signing_key = EncodingKey::from_rsa_pem(self.private_key_pem.as_bytes())
            .context("invalid service account private key")?;

        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.client_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_URI,
            iat: now,
            exp: now + 3600,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .context("failed to sign service account JWT")?;

        let response: TokenResponse = self
            .client
            .post(TOKEN_URI)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("token request failed")?
            .error_for_status()
            .context("token endpoint returned error")?
            .json()
            .await
            .context("failed to parse token response")?;

        Ok(response.access_token)
    }
}

#[async_trait]
impl SheetMirror for GoogleSheetsMirror {
    async fn append(&self, booking: &Booking) -> anyhow::Result<()> {
        let token = self.access_token().await?;

        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/Sheet1!A:I:append",
            self.sheet_id
        );

        self.client
            .post(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&serde_json::json!({ "values": [sheet_row(booking)] }))
            .send()
            .await
            .context("failed to call Sheets append")?
            .error_for_status()
            .context("Sheets API returned error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingRequest, Service};

    fn sample_booking(message: &str) -> Booking {
        let req = BookingRequest {
            name: "Jo Ann".to_string(),
            email: "jo@x.com".to_string(),
            phone: "1234567890".to_string(),
            service: "mehandi".to_string(),
            style: "Bridal".to_string(),
            date: "2025-05-01".to_string(),
            time: "14:00".to_string(),
            message: message.to_string(),
        };
        Booking::from_request(&req, Service::Mehandi)
    }

    #[test]
    fn test_sheet_row_column_order() {
        let booking = sample_booking("please call ahead");
        let row = sheet_row(&booking);

        assert_eq!(row.len(), 9);
        assert_eq!(row[1], "Jo Ann");
        assert_eq!(row[2], "jo@x.com");
        assert_eq!(row[3], "1234567890");
        assert_eq!(row[4], "mehandi");
        assert_eq!(row[5], "Bridal");
        assert_eq!(row[6], "2025-05-01");
        assert_eq!(row[7], "14:00");
        assert_eq!(row[8], "please call ahead");
    }

    #[test]
    fn test_sheet_row_timestamp_is_rfc3339() {
        let row = sheet_row(&sample_booking(""));
        assert!(chrono::DateTime::parse_from_rfc3339(&row[0]).is_ok());
    }

    #[test]
    fn test_sheet_row_empty_message_stays_empty() {
        let row = sheet_row(&sample_booking(""));
        assert_eq!(row[8], "");
    }
}
