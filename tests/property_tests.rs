/// Property-based tests using proptest
/// Tests invariants of the intake validation rules
use proptest::prelude::*;

use leadflow_intake::errors::LeadError;
use leadflow_intake::validator::{is_valid_email, LeadValidator};

// Property: phone validation should never panic
proptest! {
    #[test]
    fn phone_validation_never_panics(phone in "\\PC*") {
        let _ = LeadValidator::new().validate_phone(&phone);
    }

    #[test]
    fn phones_matching_shape_accepted(phone in "\\+?[0-9]{9,15}") {
        prop_assert!(LeadValidator::new().validate_phone(&phone).is_ok());
    }

    #[test]
    fn short_phones_rejected(phone in "\\+?[0-9]{1,8}") {
        let result = LeadValidator::new().validate_phone(&phone);
        prop_assert!(matches!(result, Err(LeadError::InvalidPhone(_))));
    }

    #[test]
    fn long_phones_rejected(phone in "\\+?[0-9]{16,30}") {
        let result = LeadValidator::new().validate_phone(&phone);
        prop_assert!(matches!(result, Err(LeadError::InvalidPhone(_))));
    }

    #[test]
    fn phones_with_letters_rejected(
        prefix in "[0-9]{4}",
        letter in "[a-z]",
        suffix in "[0-9]{5}"
    ) {
        let phone = format!("{}{}{}", prefix, letter, suffix);
        let result = LeadValidator::new().validate_phone(&phone);
        prop_assert!(matches!(result, Err(LeadError::InvalidPhone(_))));
    }
}

// Property: email validation should never panic
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn well_formed_emails_accepted(
        local in "[a-z0-9]{1,10}",
        domain in "[a-z0-9]{1,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn strings_without_at_rejected(email in "[a-z0-9.]{0,20}") {
        prop_assert!(!is_valid_email(&email));
    }

    #[test]
    fn domains_without_dot_rejected(
        local in "[a-z]{1,8}",
        domain in "[a-z]{1,12}"
    ) {
        let email = format!("{}@{}", local, domain);
        prop_assert!(!is_valid_email(&email));
    }
}

// Property: consent gates every otherwise-valid submission
proptest! {
    #[test]
    fn consent_gate_holds(phone in "\\+?[0-9]{9,15}") {
        let validator = LeadValidator::new();
        let result = validator.validate(&phone, None, false);
        prop_assert!(matches!(result, Err(LeadError::ConsentRequired)));
    }
}
