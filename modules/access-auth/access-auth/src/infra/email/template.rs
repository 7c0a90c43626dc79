//! HTML body of the verification e-mail.

/// Render the message carrying `code`, valid for `ttl_minutes`.
pub fn render_code_email(code: &str, ttl_minutes: i64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
  <body style="font-family: Arial, sans-serif; background: #f9fafb; padding: 24px;">
    <div style="max-width: 480px; margin: 0 auto; background: #ffffff; border-radius: 16px; padding: 32px; text-align: center;">
      <h1 style="color: #16a34a; margin: 0 0 8px;">ChefAI</h1>
      <p style="color: #374151;">Use o código abaixo para acessar sua conta:</p>
      <div style="font-size: 32px; font-weight: bold; letter-spacing: 8px; color: #111827; background: #f3f4f6; border-radius: 12px; padding: 16px; margin: 24px 0;">{code}</div>
      <p style="color: #6b7280; font-size: 14px;">Este código expira em {ttl_minutes} minutos.</p>
      <p style="color: #9ca3af; font-size: 12px;">Se você não solicitou este código, ignore este email.</p>
    </div>
  </body>
</html>"#
    )
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn body_contains_code_and_ttl() {
        let html = render_code_email("007391", 10);
        assert!(html.contains(">007391<"));
        assert!(html.contains("expira em 10 minutos"));
    }
}
