use std::sync::OnceLock;

use chrono::{NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Basic `local@domain.tld` shape check, nothing stricter.
fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Saree,
    Mehandi,
    Aari,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Saree => "saree",
            Service::Mehandi => "mehandi",
            Service::Aari => "aari",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "saree" => Some(Service::Saree),
            "mehandi" => Some(Service::Mehandi),
            "aari" => Some(Service::Aari),
            _ => None,
        }
    }
}

/// Raw submission body, before the store assigns `id`/`created_at`.
/// Every field is defaulted so an absent field reaches `validate()` as an
/// empty string and comes back as a 400, not a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub style: String,
    pub date: String,
    pub time: String,
    pub message: String,
}

impl BookingRequest {
    /// The one canonical validation contract, shared by every handler.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("service", &self.service),
            ("style", &self.style),
            ("date", &self.date),
            ("time", &self.time),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("missing required field: {field}"));
            }
        }

        if self.name.chars().count() < 2 {
            return Err("name must be at least 2 characters".to_string());
        }
        if !email_regex().is_match(&self.email) {
            return Err(format!("invalid email address: {}", self.email));
        }
        if self.phone.chars().count() < 10 {
            return Err("phone must be at least 10 characters".to_string());
        }
        if Service::parse(&self.service).is_none() {
            return Err(format!(
                "service must be one of saree, mehandi, aari (got: {})",
                self.service
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: Service,
    pub style: String,
    pub date: String,
    pub time: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Assigns `id` and `created_at`; the caller must have validated first.
    pub fn from_request(req: &BookingRequest, service: Service) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            service,
            style: req.style.clone(),
            date: req.date.clone(),
            time: req.time.clone(),
            message: req.message.clone(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            name: "Jo Ann".to_string(),
            email: "jo@x.com".to_string(),
            phone: "1234567890".to_string(),
            service: "saree".to_string(),
            style: "Draping".to_string(),
            date: "2025-05-01".to_string(),
            time: "14:00".to_string(),
            message: "".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        for field in ["name", "email", "phone", "service", "style", "date", "time"] {
            let mut req = valid_request();
            match field {
                "name" => req.name.clear(),
                "email" => req.email.clear(),
                "phone" => req.phone.clear(),
                "service" => req.service.clear(),
                "style" => req.style.clear(),
                "date" => req.date.clear(),
                "time" => req.time.clear(),
                _ => unreachable!(),
            }
            let err = req.validate().unwrap_err();
            assert!(err.contains(field), "expected error for {field}, got: {err}");
        }
    }

    #[test]
    fn test_short_name_rejected() {
        let mut req = valid_request();
        req.name = "J".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        for email in ["plainaddress", "no-at.example.com", "user@nodot", "a b@x.com"] {
            let mut req = valid_request();
            req.email = email.to_string();
            assert!(req.validate().is_err(), "accepted bad email: {email}");
        }
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut req = valid_request();
        req.phone = "123456789".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_service_rejected() {
        let mut req = valid_request();
        req.service = "bridal".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.contains("service"));
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let req: BookingRequest = serde_json::from_value(serde_json::json!({
            "name": "Jo Ann",
            "email": "jo@x.com",
            "phone": "1234567890",
            "service": "saree",
            "style": "Draping",
            "date": "2025-05-01",
            "time": "14:00"
        }))
        .unwrap();
        assert_eq!(req.message, "");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_service_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Service::Saree).unwrap(),
            serde_json::json!("saree")
        );
        assert_eq!(Service::parse("mehandi"), Some(Service::Mehandi));
        assert_eq!(Service::parse("haircut"), None);
    }

    #[test]
    fn test_from_request_assigns_id_and_timestamp() {
        let req = valid_request();
        let booking = Booking::from_request(&req, Service::Saree);
        assert!(!booking.id.is_empty());
        assert_eq!(booking.service, Service::Saree);
        assert_eq!(booking.message, "");
    }
}
