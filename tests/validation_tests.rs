/// Unit tests for the intake validator
/// Tests phone format, email shape, consent gating, and failure ordering
use leadflow_intake::errors::LeadError;
use leadflow_intake::validator::{is_valid_email, LeadValidator};

#[cfg(test)]
mod phone_validation_tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        let validator = LeadValidator::new();

        // Bare digits, 9 to 15 of them
        assert!(validator.validate_phone("123456789").is_ok());
        assert!(validator.validate_phone("34654669289").is_ok());
        assert!(validator.validate_phone("123456789012345").is_ok());

        // Optional leading +
        assert!(validator.validate_phone("+34654669289").is_ok());
        assert!(validator.validate_phone("+123456789012345").is_ok());
    }

    #[test]
    fn test_invalid_phones_length() {
        let validator = LeadValidator::new();

        // Too short
        assert!(validator.validate_phone("12345678").is_err());
        assert!(validator.validate_phone("+12345678").is_err());
        assert!(validator.validate_phone("").is_err());
        assert!(validator.validate_phone("+").is_err());

        // Too long
        assert!(validator.validate_phone("1234567890123456").is_err());
        assert!(validator.validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_invalid_phones_characters() {
        let validator = LeadValidator::new();

        assert!(validator.validate_phone("bad-phone").is_err());
        assert!(validator.validate_phone("12345678a").is_err());
        assert!(validator.validate_phone("(11) 98765-4321").is_err());
        assert!(validator.validate_phone("11 98765 4321").is_err());
        assert!(validator.validate_phone(" 123456789").is_err());
        assert!(validator.validate_phone("123456789 ").is_err());
        assert!(validator.validate_phone("++123456789").is_err());
        assert!(validator.validate_phone("123456789+").is_err());
    }

    #[test]
    fn test_rejection_reason_is_invalid_phone() {
        let validator = LeadValidator::new();

        let err = validator.validate_phone("bad-phone").unwrap_err();
        assert!(matches!(err, LeadError::InvalidPhone(_)));
    }
}

#[cfg(test)]
mod email_validation_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("user_name@example-domain.com"));
        assert!(is_valid_email("user@sub.example.com"));
        assert!(is_valid_email("a@b.c"));
    }

    #[test]
    fn test_invalid_emails() {
        // Missing @ or missing . after it
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@examplecom"));
        assert!(!is_valid_email(""));

        // Empty segments around the separators
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("user@.com"));

        // Embedded @
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@exam@ple.com"));
    }

    #[test]
    fn test_missing_email_passes_validation() {
        let validator = LeadValidator::new();
        assert!(validator.validate("123456789", None, true).is_ok());
    }

    #[test]
    fn test_rejection_reason_is_invalid_email() {
        let validator = LeadValidator::new();

        let err = validator.validate_email("not-an-email").unwrap_err();
        assert!(matches!(err, LeadError::InvalidEmail(_)));
    }
}

#[cfg(test)]
mod consent_tests {
    use super::*;

    #[test]
    fn test_consent_required() {
        let validator = LeadValidator::new();

        let err = validator
            .validate("123456789", Some("user@example.com"), false)
            .unwrap_err();
        assert!(matches!(err, LeadError::ConsentRequired));

        let err = validator.validate("123456789", None, false).unwrap_err();
        assert!(matches!(err, LeadError::ConsentRequired));
    }

    #[test]
    fn test_full_gate_accepts_consented_valid_input() {
        let validator = LeadValidator::new();
        assert!(validator
            .validate("+34654669289", Some("f@example.com"), true)
            .is_ok());
    }
}

#[cfg(test)]
mod failure_ordering_tests {
    use super::*;

    // The gate checks phone, then email, then consent, and reports only
    // the first failure.

    #[test]
    fn test_phone_failure_wins_over_email_and_consent() {
        let validator = LeadValidator::new();

        let err = validator
            .validate("bad-phone", Some("also-bad"), false)
            .unwrap_err();
        assert!(matches!(err, LeadError::InvalidPhone(_)));
    }

    #[test]
    fn test_email_failure_wins_over_consent() {
        let validator = LeadValidator::new();

        let err = validator
            .validate("123456789", Some("also-bad"), false)
            .unwrap_err();
        assert!(matches!(err, LeadError::InvalidEmail(_)));
    }
}

#[cfg(test)]
mod error_handling_tests {
    use super::*;

    #[test]
    fn test_lead_error_types() {
        let db_error = LeadError::DatabaseError(sqlx::Error::RowNotFound);
        assert!(matches!(db_error, LeadError::DatabaseError(_)));

        let not_found = LeadError::NotFound("lead 42 does not exist".to_string());
        assert!(matches!(not_found, LeadError::NotFound(_)));

        let invalid_phone = LeadError::InvalidPhone("bad-phone".to_string());
        assert!(matches!(invalid_phone, LeadError::InvalidPhone(_)));
    }

    #[test]
    fn test_error_display() {
        let error = LeadError::InvalidPhone("bad-phone".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Invalid phone"));
        assert!(display.contains("bad-phone"));

        let error = LeadError::ConsentRequired;
        assert!(format!("{}", error).contains("Consent required"));

        let error = LeadError::NotFound("lead 42 does not exist".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Not found"));
        assert!(display.contains("lead 42"));
    }
}
