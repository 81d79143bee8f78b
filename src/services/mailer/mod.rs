pub mod smtp;

use async_trait::async_trait;

use crate::models::BookingRequest;

pub const NOTIFICATION_SUBJECT: &str = "New Booking Request";

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub subject: String,
    pub html_body: String,
}

/// Builds the admin notification for one booking submission.
pub fn booking_notification(data: &BookingRequest) -> OutgoingEmail {
    OutgoingEmail {
        subject: NOTIFICATION_SUBJECT.to_string(),
        html_body: render_notification_html(data),
    }
}

// An empty message renders as "None" here, while the store keeps the empty
// string. Both behaviors are intentional and preserved.
pub fn render_notification_html(data: &BookingRequest) -> String {
    let message = if data.message.is_empty() {
        "None"
    } else {
        data.message.as_str()
    };

    format!(
        "<h2>New Booking Received</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Service:</strong> {}</p>\
         <p><strong>Style:</strong> {}</p>\
         <p><strong>Date:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>\
         <p><strong>Message:</strong> {}</p>",
        data.name, data.email, data.phone, data.service, data.style, data.date, data.time, message
    )
}

/// Fixed payload for the operability check. Never persisted.
pub fn sample_booking_request() -> BookingRequest {
    BookingRequest {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        phone: "1234567890".to_string(),
        service: "saree".to_string(),
        style: "Traditional Pleating".to_string(),
        date: "2025-03-26".to_string(),
        time: "10:00 AM".to_string(),
        message: "Test message".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_message(message: &str) -> BookingRequest {
        BookingRequest {
            name: "Jo Ann".to_string(),
            email: "jo@x.com".to_string(),
            phone: "1234567890".to_string(),
            service: "aari".to_string(),
            style: "Blouse work".to_string(),
            date: "2025-05-01".to_string(),
            time: "14:00".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_empty_message_renders_none() {
        let html = render_notification_html(&request_with_message(""));
        assert!(html.contains("<strong>Message:</strong> None"));
    }

    #[test]
    fn test_message_renders_literally() {
        let html = render_notification_html(&request_with_message("evening slot preferred"));
        assert!(html.contains("<strong>Message:</strong> evening slot preferred"));
        assert!(!html.contains("None"));
    }

    #[test]
    fn test_all_fields_present_in_body() {
        let html = render_notification_html(&request_with_message("hi"));
        for expected in [
            "Jo Ann",
            "jo@x.com",
            "1234567890",
            "aari",
            "Blouse work",
            "2025-05-01",
            "14:00",
        ] {
            assert!(html.contains(expected), "missing {expected} in body");
        }
    }

    #[test]
    fn test_notification_subject() {
        let email = booking_notification(&request_with_message(""));
        assert_eq!(email.subject, "New Booking Request");
    }

    #[test]
    fn test_sample_request_is_valid() {
        assert!(sample_booking_request().validate().is_ok());
    }
}
