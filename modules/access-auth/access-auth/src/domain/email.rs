//! E-mail address helpers.

use access_auth_sdk::normalize_email;

use super::error::DomainError;

/// Normalize and minimally validate an address supplied by a caller.
pub fn parse_email(raw: &str) -> Result<String, DomainError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(DomainError::validation("Email é obrigatório"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(DomainError::validation("Email inválido")),
    }
}

/// Form used in logs: first character of the local part, then the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_owned(),
    }
}
