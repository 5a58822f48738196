use super::domain::ContactDetails;

const MAX_NAME_LEN: usize = 120;
const MAX_NOTES_LEN: usize = 2000;

/// Validation errors raised for booking contact fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactViolation {
    #[error("name is required")]
    MissingName,
    #[error("name must be at most 120 characters")]
    NameTooLong,
    #[error("email address '{0}' is not valid")]
    InvalidEmail(String),
    #[error("phone number '{0}' is not valid")]
    InvalidPhone(String),
    #[error("notes must be at most 2000 characters")]
    NotesTooLong,
}

/// Trim contact fields and reject values the booking desk cannot act on.
pub(crate) fn sanitize_contact(contact: ContactDetails) -> Result<ContactDetails, ContactViolation> {
    let name = contact.name.trim().to_string();
    if name.is_empty() {
        return Err(ContactViolation::MissingName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ContactViolation::NameTooLong);
    }

    let email = contact.email.trim().to_ascii_lowercase();
    if !plausible_email(&email) {
        return Err(ContactViolation::InvalidEmail(contact.email));
    }

    let phone = match contact.phone.map(|raw| raw.trim().to_string()) {
        Some(phone) if phone.is_empty() => None,
        Some(phone) => {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            let allowed = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')' | '.'));
            if !allowed || !(6..=15).contains(&digits) {
                return Err(ContactViolation::InvalidPhone(phone));
            }
            Some(phone)
        }
        None => None,
    };

    let notes = contact
        .notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());
    if notes
        .as_ref()
        .is_some_and(|notes| notes.chars().count() > MAX_NOTES_LEN)
    {
        return Err(ContactViolation::NotesTooLong);
    }

    Ok(ContactDetails {
        name,
        email,
        phone,
        preferred_date: contact.preferred_date,
        notes,
    })
}

fn plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "  Ana Ruiz ".to_string(),
            email: " Ana.Ruiz@Example.com".to_string(),
            phone: Some("+34 600 123 456".to_string()),
            preferred_date: None,
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn trims_and_normalizes_fields() {
        let sanitized = sanitize_contact(contact()).expect("valid contact");
        assert_eq!(sanitized.name, "Ana Ruiz");
        assert_eq!(sanitized.email, "ana.ruiz@example.com");
        assert_eq!(sanitized.phone.as_deref(), Some("+34 600 123 456"));
        assert!(sanitized.notes.is_none());
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        let mut blank = contact();
        blank.name = "   ".to_string();
        assert_eq!(sanitize_contact(blank), Err(ContactViolation::MissingName));

        for email in ["ana", "ana@", "@example.com", "ana@example", "a b@example.com"] {
            let mut bad = contact();
            bad.email = email.to_string();
            assert!(
                matches!(sanitize_contact(bad), Err(ContactViolation::InvalidEmail(_))),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_phone_with_letters() {
        let mut bad = contact();
        bad.phone = Some("call me".to_string());
        assert!(matches!(
            sanitize_contact(bad),
            Err(ContactViolation::InvalidPhone(_))
        ));
    }
}
