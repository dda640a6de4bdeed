use bson::Document;
use serde::Serialize;
use validator::Validate;

use crate::model::{Contact, ContactSubject};
use crate::query::{first_param, list_filter, Filter, PageRequest};
use crate::validation::{EMAIL_DOMAIN_RE, PHONE_NUMBER_RE};

pub const CONTACT_SEARCH_FIELDS: &[&str] = &["fullName", "email", "message"];

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateContactRequest {
    #[validate(required, length(min = 2, max = 100))]
    pub fullName: Option<String>,

    #[validate(required, email, regex(path = *EMAIL_DOMAIN_RE))]
    pub email: Option<String>,

    #[validate(required, regex(path = *PHONE_NUMBER_RE))]
    pub contactNumber: Option<String>,

    #[validate(required)]
    pub subject: Option<String>,

    #[validate(required, length(min = 10, max = 2000))]
    pub message: Option<String>,
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateContactRequest {
    #[validate(length(min = 2, max = 100))]
    pub fullName: Option<String>,

    #[validate(email, regex(path = *EMAIL_DOMAIN_RE))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_NUMBER_RE))]
    pub contactNumber: Option<String>,

    pub subject: Option<String>,

    #[validate(length(min = 10, max = 2000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub subject: ContactSubject,
    pub message: String,
}

impl NewContact {
    pub fn into_contact(self) -> Contact {
        Contact {
            id: None,
            fullName: self.full_name,
            email: self.email,
            contactNumber: self.contact_number,
            subject: self.subject,
            message: self.message,
            createdAt: None,
            updatedAt: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub subject: Option<ContactSubject>,
    pub message: Option<String>,
}

impl ContactPatch {
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(v) = &self.full_name {
            set.insert("fullName", v.as_str());
        }
        if let Some(v) = &self.email {
            set.insert("email", v.as_str());
        }
        if let Some(v) = &self.contact_number {
            set.insert("contactNumber", v.as_str());
        }
        if let Some(v) = self.subject {
            set.insert("subject", v.as_str());
        }
        if let Some(v) = &self.message {
            set.insert("message", v.as_str());
        }
        set
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub subject: Option<String>,
    pub email: Option<String>,
    pub search: Option<String>,
}

impl ContactListParams {
    /// Builds the parameters from raw query pairs, ignoring unknown keys.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        ContactListParams {
            page: first_param(pairs, "page"),
            limit: first_param(pairs, "limit"),
            subject: first_param(pairs, "subject"),
            email: first_param(pairs, "email"),
            search: first_param(pairs, "search"),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn to_filter(&self) -> Filter {
        list_filter(
            ("subject", self.subject.as_deref()),
            self.email.as_deref(),
            self.search.as_deref(),
            CONTACT_SEARCH_FIELDS,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub contact_number: String,
    pub subject: ContactSubject,
    pub message: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        ContactResponse {
            id: contact.id.map(|id| id.to_hex()),
            full_name: contact.fullName,
            email: contact.email,
            contact_number: contact.contactNumber,
            subject: contact.subject,
            message: contact.message,
            created_at: contact.createdAt,
            updated_at: contact.updatedAt,
        }
    }
}
