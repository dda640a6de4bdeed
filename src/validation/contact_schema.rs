use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::dto::contact_dto::{ContactPatch, CreateContactRequest, NewContact, UpdateContactRequest};
use crate::model::ContactSubject;
use crate::validation::{check_choice, FieldError, FieldRule, Mode, Schema};

static CONTACT_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "fullName",
        label: "Full name",
        min_len: 2,
        required: "Full name is required",
        too_short: "Full name must be at least 2 characters long",
        too_long: "Full name cannot exceed 100 characters",
        ..FieldRule::BASE
    },
    FieldRule {
        name: "email",
        label: "Email",
        lowercase: true,
        required: "Email is required",
        invalid: "Please provide a valid email address",
        ..FieldRule::BASE
    },
    FieldRule {
        name: "contactNumber",
        label: "Contact number",
        required: "Contact number is required",
        invalid: "Please provide a valid contact number",
        ..FieldRule::BASE
    },
    FieldRule {
        name: "subject",
        label: "Subject",
        required: "Subject is required",
        invalid: "Please select a valid subject",
        ..FieldRule::BASE
    },
    FieldRule {
        name: "message",
        label: "Message",
        min_len: 10,
        required: "Message is required",
        too_short: "Message must be at least 10 characters long",
        too_long: "Message cannot exceed 2000 characters",
        ..FieldRule::BASE
    },
];

pub static CONTACT_SCHEMA: Schema = Schema { fields: CONTACT_FIELDS };

pub fn validate_create_contact(payload: &Value) -> Result<NewContact, Vec<FieldError>> {
    let raw = CONTACT_SCHEMA.read(payload)?;
    let request = CreateContactRequest {
        fullName: raw.owned("fullName"),
        email: raw.owned("email"),
        contactNumber: raw.owned("contactNumber"),
        subject: raw.owned("subject"),
        message: raw.owned("message"),
    };
    let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
    let subject = check_choice::<ContactSubject>(&mut errors, "subject", request.subject.as_deref());

    let report = CONTACT_SCHEMA.report(&raw, &errors, Mode::Create);
    match (request, subject) {
        (
            CreateContactRequest {
                fullName: Some(full_name),
                email: Some(email),
                contactNumber: Some(contact_number),
                message: Some(message),
                ..
            },
            Some(subject),
        ) if report.is_empty() => Ok(NewContact {
            full_name,
            email,
            contact_number,
            subject,
            message,
        }),
        _ => Err(report),
    }
}

pub fn validate_update_contact(payload: &Value) -> Result<ContactPatch, Vec<FieldError>> {
    let raw = CONTACT_SCHEMA.read(payload)?;
    let request = UpdateContactRequest {
        fullName: raw.owned("fullName"),
        email: raw.owned("email"),
        contactNumber: raw.owned("contactNumber"),
        subject: raw.owned("subject"),
        message: raw.owned("message"),
    };
    let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
    let subject = check_choice::<ContactSubject>(&mut errors, "subject", request.subject.as_deref());

    let report = CONTACT_SCHEMA.report(&raw, &errors, Mode::Update);
    if !report.is_empty() {
        return Err(report);
    }
    Ok(ContactPatch {
        full_name: request.fullName,
        email: request.email,
        contact_number: request.contactNumber,
        subject,
        message: request.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_contact() {
        let contact = validate_create_contact(&json!({
            "fullName": "Ravi Kumar",
            "email": "Ravi@Example.com",
            "contactNumber": "9876543210",
            "subject": "claim",
            "message": "  My claim has been pending for weeks.  "
        }))
        .unwrap();
        assert_eq!(contact.email, "ravi@example.com");
        assert_eq!(contact.subject, ContactSubject::Claim);
        assert_eq!(contact.message, "My claim has been pending for weeks.");
    }

    #[test]
    fn test_missing_message_and_bad_subject() {
        let errors = validate_create_contact(&json!({
            "fullName": "Ravi Kumar",
            "email": "ravi@example.com",
            "contactNumber": "9876543210",
            "subject": "complaint"
        }))
        .unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("subject", "Please select a valid subject"),
                FieldError::new("message", "Message is required"),
            ]
        );
    }

    #[test]
    fn test_short_message_counts_trimmed_length() {
        let errors = validate_create_contact(&json!({
            "fullName": "Ravi Kumar",
            "email": "ravi@example.com",
            "contactNumber": "9876543210",
            "subject": "other",
            "message": "   short     "
        }))
        .unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("message", "Message must be at least 10 characters long")]
        );
    }

    #[test]
    fn test_update_email_domain_and_empty_message() {
        let errors = validate_update_contact(&json!({ "email": "ravi@localhost", "message": "" })).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("email", "Please provide a valid email address"),
                FieldError::new("message", "\"message\" is not allowed to be empty"),
            ]
        );
    }

    #[test]
    fn test_update_contact_number_pattern() {
        let errors = validate_update_contact(&json!({ "contactNumber": "abc" })).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new("contactNumber", "Please provide a valid contact number")]
        );
        let patch = validate_update_contact(&json!({ "subject": "policy" })).unwrap();
        assert_eq!(patch.subject, Some(ContactSubject::Policy));
    }
}
