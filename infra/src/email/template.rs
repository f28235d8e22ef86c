//! Verification email content

/// Rendered verification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl VerificationEmail {
    /// Render the message carrying `code`, valid for `expires_in_minutes`
    ///
    /// `code` is interpolated verbatim; callers pass an issued six-digit code.
    pub fn render(code: &str, expires_in_minutes: i64) -> Self {
        let subject = format!("Seu código de verificação da Ouvidoria: {}", code);

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<body style="font-family: Arial, sans-serif; color: #1f2933;">
  <h2>Ouvidoria</h2>
  <p>Use o código abaixo para acessar sua conta:</p>
  <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px;">{code}</p>
  <p>O código expira em {minutes} minutos e só pode ser usado uma vez.</p>
  <p>Se você não solicitou este código, ignore este e-mail.</p>
</body>
</html>"#,
            code = code,
            minutes = expires_in_minutes,
        );

        let text = format!(
            "Seu código de verificação da Ouvidoria é {}. Ele expira em {} minutos.",
            code, expires_in_minutes
        );

        Self { subject, html, text }
    }
}
