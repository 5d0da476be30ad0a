//! Notification email rendering.
//!
//! The body is a single self-contained HTML document with inline CSS, since
//! most mail clients ignore external stylesheets. Field values go through
//! maud's escaping.

use axyn_core::ValidContact;
use chrono::{DateTime, Datelike, Timelike, Utc};
use maud::{DOCTYPE, PreEscaped, html};

/// Inline CSS for the notification email.
const EMAIL_CSS: &str = r#"
body{font-family:Arial,sans-serif;line-height:1.6;color:#333;max-width:600px;margin:0 auto;padding:20px}
.header{background:linear-gradient(135deg,#1a1a1a 0%,#2d2d2d 100%);color:#FFD700;padding:30px;border-radius:10px 10px 0 0;text-align:center}
.header h1{margin:0;font-size:24px}
.content{background:#f9f9f9;padding:30px;border-radius:0 0 10px 10px}
.field{margin-bottom:20px;padding:15px;background:white;border-radius:8px;border-left:4px solid #FFD700}
.field-label{font-weight:bold;color:#666;font-size:12px;text-transform:uppercase;margin-bottom:5px}
.field-value{color:#333;font-size:16px}
.message-box{background:white;padding:20px;border-radius:8px;border:1px solid #e0e0e0;margin-top:10px;white-space:pre-wrap}
.footer{text-align:center;margin-top:30px;padding-top:20px;border-top:1px solid #e0e0e0;color:#666;font-size:12px}
.btn{display:inline-block;padding:12px 30px;background:#FFD700;color:#1a1a1a;text-decoration:none;border-radius:5px;font-weight:bold;margin-top:20px}
"#;

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Subject line for a new-contact notification.
pub fn subject(contact: &ValidContact) -> String {
    format!("🔔 Nuevo mensaje de contacto de {}", contact.name)
}

/// Render the notification body for `contact`, stamped with `sent_at`.
pub fn render_notification(contact: &ValidContact, sent_at: DateTime<Utc>) -> String {
    let mailto = format!("mailto:{}", contact.email);

    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                style { (PreEscaped(EMAIL_CSS)) }
            }
            body {
                div class="header" {
                    h1 { "⭐ Nuevo Mensaje de Contacto" }
                }
                div class="content" {
                    div class="field" {
                        div class="field-label" { "Nombre" }
                        div class="field-value" { (contact.name) }
                    }
                    div class="field" {
                        div class="field-label" { "Email" }
                        div class="field-value" {
                            a href=(mailto) style="color: #FFD700;" { (contact.email) }
                        }
                    }
                    div class="field" {
                        div class="field-label" { "Mensaje" }
                        div class="message-box" { (contact.message) }
                    }
                    div style="text-align: center;" {
                        a href=(mailto) class="btn" { "Responder a " (contact.name) }
                    }
                }
                div class="footer" {
                    p { "Este mensaje fue enviado desde el formulario de contacto de Axyn Services" }
                    p { "Fecha: " (format_date_es(sent_at)) }
                }
            }
        }
    }
    .into_string()
}

/// Long Spanish date, e.g. "domingo, 18 de octubre de 2026, 14:05 UTC".
fn format_date_es(at: DateTime<Utc>) -> String {
    let weekday = WEEKDAYS[at.weekday().num_days_from_monday() as usize];
    let month = MONTHS[at.month0() as usize];
    format!(
        "{weekday}, {} de {month} de {}, {:02}:{:02} UTC",
        at.day(),
        at.year(),
        at.hour(),
        at.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contact() -> ValidContact {
        ValidContact {
            name: "Ana Gómez".to_string(),
            email: "ANA@Example.com".to_string(),
            message: "Hola, quiero más información.\nGracias.".to_string(),
        }
    }

    #[test]
    fn subject_includes_sender_name() {
        assert_eq!(
            subject(&contact()),
            "🔔 Nuevo mensaje de contacto de Ana Gómez"
        );
    }

    #[test]
    fn body_contains_fields_and_reply_link() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
        let html = render_notification(&contact(), at);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Ana Gómez"));
        assert!(html.contains("href=\"mailto:ANA@Example.com\""));
        assert!(html.contains("Responder a Ana Gómez"));
        assert!(html.contains("Hola, quiero más información.\nGracias."));
        assert!(html.contains("Fecha: domingo, 18 de octubre de 2026, 14:05 UTC"));
    }

    #[test]
    fn body_escapes_markup_in_fields() {
        let contact = ValidContact {
            name: "<b>Eve</b>".to_string(),
            email: "eve@example.com".to_string(),
            message: "<script>alert('x')</script> hola".to_string(),
        };
        let html = render_notification(&contact, Utc::now());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    }

    #[test]
    fn spanish_date_format() {
        let at = Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap();
        assert_eq!(format_date_es(at), "lunes, 6 de enero de 2025, 09:00 UTC");
    }
}
