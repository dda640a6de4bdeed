use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::dto::quote_dto::{CreateQuoteRequest, NewQuote, QuotePatch, UpdateQuoteRequest};
use crate::model::InsuranceType;
use crate::validation::{check_choice, FieldError, FieldRule, Mode, RawPayload, Schema};

static QUOTE_FIELDS: &[FieldRule] = &[
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
        name: "phoneNumber",
        label: "Phone number",
        required: "Phone number is required",
        invalid: "Please provide a valid phone number",
        ..FieldRule::BASE
    },
    FieldRule {
        name: "insuranceType",
        label: "Insurance type",
        required: "Insurance type is required",
        invalid: "Please select a valid insurance type",
        ..FieldRule::BASE
    },
    FieldRule {
        name: "additionalInfo",
        label: "Additional information",
        allow_empty: true,
        too_long: "Additional information cannot exceed 1000 characters",
        ..FieldRule::BASE
    },
];

pub static QUOTE_SCHEMA: Schema = Schema { fields: QUOTE_FIELDS };

fn derive_errors(result: Result<(), ValidationErrors>) -> ValidationErrors {
    result.err().unwrap_or_else(ValidationErrors::new)
}

/// Validates a quote submission; every invalid field is reported.
pub fn validate_create_quote(payload: &Value) -> Result<NewQuote, Vec<FieldError>> {
    let raw: RawPayload = QUOTE_SCHEMA.read(payload)?;
    let request = CreateQuoteRequest {
        fullName: raw.owned("fullName"),
        email: raw.owned("email"),
        phoneNumber: raw.owned("phoneNumber"),
        insuranceType: raw.owned("insuranceType"),
        additionalInfo: raw.owned("additionalInfo"),
    };
    let mut errors = derive_errors(request.validate());
    let insurance_type =
        check_choice::<InsuranceType>(&mut errors, "insuranceType", request.insuranceType.as_deref());

    let report = QUOTE_SCHEMA.report(&raw, &errors, Mode::Create);
    match (request, insurance_type) {
        (
            CreateQuoteRequest {
                fullName: Some(full_name),
                email: Some(email),
                phoneNumber: Some(phone_number),
                additionalInfo: additional_info,
                ..
            },
            Some(insurance_type),
        ) if report.is_empty() => Ok(NewQuote {
            full_name,
            email,
            phone_number,
            insurance_type,
            additional_info,
        }),
        _ => Err(report),
    }
}

/// Validates a partial quote update; absent fields are not errors.
pub fn validate_update_quote(payload: &Value) -> Result<QuotePatch, Vec<FieldError>> {
    let raw = QUOTE_SCHEMA.read(payload)?;
    let request = UpdateQuoteRequest {
        fullName: raw.owned("fullName"),
        email: raw.owned("email"),
        phoneNumber: raw.owned("phoneNumber"),
        insuranceType: raw.owned("insuranceType"),
        additionalInfo: raw.owned("additionalInfo"),
    };
    let mut errors = derive_errors(request.validate());
    let insurance_type =
        check_choice::<InsuranceType>(&mut errors, "insuranceType", request.insuranceType.as_deref());

    let report = QUOTE_SCHEMA.report(&raw, &errors, Mode::Update);
    if !report.is_empty() {
        return Err(report);
    }
    Ok(QuotePatch {
        full_name: request.fullName,
        email: request.email,
        phone_number: request.phoneNumber,
        insurance_type,
        additional_info: request.additionalInfo,
    })
}
