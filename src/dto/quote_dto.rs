use bson::Document;
use serde::Serialize;
use validator::Validate;

use crate::model::{InsuranceType, Quote};
use crate::query::{first_param, list_filter, Condition, Filter, PageRequest};
use crate::validation::{EMAIL_DOMAIN_RE, PHONE_NUMBER_RE};

pub const QUOTE_SEARCH_FIELDS: &[&str] = &["fullName", "email", "additionalInfo"];

// --- Validated DTOs for request validation ---

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateQuoteRequest {
    #[validate(required, length(min = 2, max = 100))]
    pub fullName: Option<String>,

    #[validate(required, email, regex(path = *EMAIL_DOMAIN_RE))]
    pub email: Option<String>,

    #[validate(required, regex(path = *PHONE_NUMBER_RE))]
    pub phoneNumber: Option<String>,

    // Membership is checked against `InsuranceType` after derive validation.
    #[validate(required)]
    pub insuranceType: Option<String>,

    #[validate(length(max = 1000))]
    pub additionalInfo: Option<String>,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateQuoteRequest {
    #[validate(length(min = 2, max = 100))]
    pub fullName: Option<String>,

    #[validate(email, regex(path = *EMAIL_DOMAIN_RE))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_NUMBER_RE))]
    pub phoneNumber: Option<String>,

    pub insuranceType: Option<String>,

    #[validate(length(max = 1000))]
    pub additionalInfo: Option<String>,
}

/// A validated, normalized quote submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub insurance_type: InsuranceType,
    pub additional_info: Option<String>,
}

impl NewQuote {
    pub fn into_quote(self) -> Quote {
        Quote {
            id: None,
            fullName: self.full_name,
            email: self.email,
            phoneNumber: self.phone_number,
            insuranceType: self.insurance_type,
            additionalInfo: self.additional_info,
            createdAt: None,
            updatedAt: None,
        }
    }
}

/// Fields to overwrite on an existing quote; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub insurance_type: Option<InsuranceType>,
    pub additional_info: Option<String>,
}

impl QuotePatch {
    /// `$set` body for the present fields.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(v) = &self.full_name {
            set.insert("fullName", v.as_str());
        }
        if let Some(v) = &self.email {
            set.insert("email", v.as_str());
        }
        if let Some(v) = &self.phone_number {
            set.insert("phoneNumber", v.as_str());
        }
        if let Some(v) = self.insurance_type {
            set.insert("insuranceType", v.as_str());
        }
        if let Some(v) = &self.additional_info {
            set.insert("additionalInfo", v.as_str());
        }
        set
    }
}

/// Filter used to look for an existing quote with the same email and type.
pub fn duplicate_quote_filter(email: &str, insurance_type: InsuranceType) -> Filter {
    Filter::new()
        .and(Condition::equals("email", email))
        .and(Condition::equals("insuranceType", insurance_type.as_str()))
}

#[derive(Debug, Clone, Default)]
pub struct QuoteListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub insurance_type: Option<String>,
    pub email: Option<String>,
    pub search: Option<String>,
}

impl QuoteListParams {
    /// Builds the parameters from raw query pairs, ignoring unknown keys.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        QuoteListParams {
            page: first_param(pairs, "page"),
            limit: first_param(pairs, "limit"),
            insurance_type: first_param(pairs, "insuranceType"),
            email: first_param(pairs, "email"),
            search: first_param(pairs, "search"),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn to_filter(&self) -> Filter {
        list_filter(
            ("insuranceType", self.insurance_type.as_deref()),
            self.email.as_deref(),
            self.search.as_deref(),
            QUOTE_SEARCH_FIELDS,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub insurance_type: InsuranceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse {
            id: quote.id.map(|id| id.to_hex()),
            full_name: quote.fullName,
            email: quote.email,
            phone_number: quote.phoneNumber,
            insurance_type: quote.insuranceType,
            additional_info: quote.additionalInfo,
            created_at: quote.createdAt,
            updated_at: quote.updatedAt,
        }
    }
}
