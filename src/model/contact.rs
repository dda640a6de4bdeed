use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Record, UnknownVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    Quote,
    Claim,
    Policy,
    Other,
}

impl ContactSubject {
    pub const ALL: [ContactSubject; 4] = [
        ContactSubject::Quote,
        ContactSubject::Claim,
        ContactSubject::Policy,
        ContactSubject::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSubject::Quote => "quote",
            ContactSubject::Claim => "claim",
            ContactSubject::Policy => "policy",
            ContactSubject::Other => "other",
        }
    }
}

impl fmt::Display for ContactSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactSubject {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactSubject::ALL
            .iter()
            .copied()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub fullName: String,
    pub email: String,
    pub contactNumber: String,
    pub subject: ContactSubject,
    pub message: String,
    #[serde(default)]
    pub createdAt: Option<String>,
    #[serde(default)]
    pub updatedAt: Option<String>,
}

impl Record for Contact {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn prepare_insert(&mut self, id: ObjectId, now: String) {
        self.id = Some(id);
        self.createdAt = Some(now.clone());
        self.updatedAt = Some(now);
    }
}
