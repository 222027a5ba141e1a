use tracing::info;

/// Fire-and-forget delivery of password reset links. Failures are logged
/// and swallowed: the enclosing request must succeed either way so the
/// response cannot reveal whether the email matched an account.
#[derive(Clone)]
pub struct PasswordResetMailer {
    web_app_url: String,
}

impl PasswordResetMailer {
    pub fn new(web_app_url: impl Into<String>) -> Self {
        Self {
            web_app_url: web_app_url.into(),
        }
    }

    pub fn reset_url(&self, token: &str) -> String {
        format!(
            "{}/reset-password.html?token={}",
            self.web_app_url.trim_end_matches('/'),
            token
        )
    }

    pub async fn send_reset_link(&self, recipient: &str, token: &str) {
        let url = self.reset_url(token);
        // TODO: wire an email provider; until then the link only lands in
        // the logs.
        info!(recipient = %recipient, url = %url, "Password reset link issued");
    }
}
