//! Verification email template rendered with Askama
use askama::Template;

/// Subject line of the verification email
pub const VERIFICATION_SUBJECT: &str = "Verification Code";

/// HTML body of the verification email
///
/// `ttl_minutes` is the validity shown to the reader and `year` the
/// copyright year printed in the footer next to `sender_name`.
#[derive(Template)]
#[template(path = "verification_email.html")]
pub struct VerificationEmailTemplate {
    pub code: String,
    pub ttl_minutes: u64,
    pub year: i32,
    pub sender_name: String,
}

impl VerificationEmailTemplate {
    pub fn new(
        code: impl Into<String>,
        sender_name: impl Into<String>,
        ttl_minutes: u64,
        year: i32,
    ) -> Self {
        Self {
            code: code.into(),
            ttl_minutes,
            year,
            sender_name: sender_name.into(),
        }
    }

    pub fn render_html(&self) -> Result<String, askama::Error> {
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_contains_code_and_footer() {
        let html = VerificationEmailTemplate::new("483920", "Acme Accounts", 10, 2026)
            .render_html()
            .unwrap();

        assert!(html.contains("Your verification code is: 483920"));
        assert!(html.contains("valid for 10 minutes"));
        assert!(html.contains("ignore this email"));
        assert!(html.contains("&copy; 2026 Acme Accounts"));
    }

    #[test]
    fn test_sender_name_is_escaped() {
        let html = VerificationEmailTemplate::new("000000", "<b>R&D</b>", 5, 2026)
            .render_html()
            .unwrap();

        assert!(html.contains("&lt;b&gt;R&amp;D&lt;/b&gt;"));
        assert!(!html.contains("<b>R&D</b>"));
    }

    #[test]
    fn test_code_is_escaped() {
        let html = VerificationEmailTemplate::new("<script>", "Acme", 5, 2026)
            .render_html()
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
