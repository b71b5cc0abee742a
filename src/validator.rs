/// Input validation for the intake pipeline
///
/// Gates malformed or non-consented payloads before they reach storage.
/// All checks are pure and side-effect-free; rejection order is
/// phone, then email, then consent, stopping at the first failure so a
/// caller always gets a single reason per submission.
use crate::errors::LeadError;
use regex::Regex;

/// Optional leading `+`, then 9 to 15 digits.
const PHONE_PATTERN: &str = r"^\+?[0-9]{9,15}$";

/// Validate email address
///
/// Checks the minimal shape `local-part@domain.tld`:
/// - exactly one `@` with a non-empty local part
/// - a `.` somewhere after the `@`, with characters on both sides
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(domain) => domain,
        None => return false,
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validator for raw lead payloads.
pub struct LeadValidator {
    phone_pattern: Regex,
}

impl LeadValidator {
    pub fn new() -> Self {
        Self {
            phone_pattern: Regex::new(PHONE_PATTERN).unwrap(),
        }
    }

    /// Run the full gate over one submission: phone, then email, then consent.
    pub fn validate(
        &self,
        phone: &str,
        email: Option<&str>,
        consent: bool,
    ) -> Result<(), LeadError> {
        self.validate_phone(phone)?;
        if let Some(email) = email {
            self.validate_email(email)?;
        }
        if !consent {
            tracing::warn!("Rejected lead {}: consent not affirmed", phone);
            return Err(LeadError::ConsentRequired);
        }
        Ok(())
    }

    pub fn validate_phone(&self, phone: &str) -> Result<(), LeadError> {
        if !self.phone_pattern.is_match(phone) {
            tracing::warn!("Rejected invalid phone: {}", phone);
            return Err(LeadError::InvalidPhone(phone.to_string()));
        }
        Ok(())
    }

    pub fn validate_email(&self, email: &str) -> Result<(), LeadError> {
        if !is_valid_email(email) {
            tracing::warn!("Rejected invalid email: {}", email);
            return Err(LeadError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }
}

impl Default for LeadValidator {
    fn default() -> Self {
        Self::new()
    }
}
