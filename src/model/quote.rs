use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Record, UnknownVariant};

/// Insurance categories a quote can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsuranceType {
    Health,
    Motor,
    Life,
    Home,
    Travel,
    Commercial,
    Marine,
    Fire,
    Liability,
    PersonalAccident,
    CriticalIllness,
    SeniorCitizen,
    Child,
    Term,
    Endowment,
    Ulip,
    Pension,
    TwoWheeler,
    CommercialVehicle,
    Crop,
    Pet,
    Cyber,
    Other,
}

impl InsuranceType {
    pub const ALL: [InsuranceType; 23] = [
        InsuranceType::Health,
        InsuranceType::Motor,
        InsuranceType::Life,
        InsuranceType::Home,
        InsuranceType::Travel,
        InsuranceType::Commercial,
        InsuranceType::Marine,
        InsuranceType::Fire,
        InsuranceType::Liability,
        InsuranceType::PersonalAccident,
        InsuranceType::CriticalIllness,
        InsuranceType::SeniorCitizen,
        InsuranceType::Child,
        InsuranceType::Term,
        InsuranceType::Endowment,
        InsuranceType::Ulip,
        InsuranceType::Pension,
        InsuranceType::TwoWheeler,
        InsuranceType::CommercialVehicle,
        InsuranceType::Crop,
        InsuranceType::Pet,
        InsuranceType::Cyber,
        InsuranceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::Health => "health",
            InsuranceType::Motor => "motor",
            InsuranceType::Life => "life",
            InsuranceType::Home => "home",
            InsuranceType::Travel => "travel",
            InsuranceType::Commercial => "commercial",
            InsuranceType::Marine => "marine",
            InsuranceType::Fire => "fire",
            InsuranceType::Liability => "liability",
            InsuranceType::PersonalAccident => "personal-accident",
            InsuranceType::CriticalIllness => "critical-illness",
            InsuranceType::SeniorCitizen => "senior-citizen",
            InsuranceType::Child => "child",
            InsuranceType::Term => "term",
            InsuranceType::Endowment => "endowment",
            InsuranceType::Ulip => "ulip",
            InsuranceType::Pension => "pension",
            InsuranceType::TwoWheeler => "two-wheeler",
            InsuranceType::CommercialVehicle => "commercial-vehicle",
            InsuranceType::Crop => "crop",
            InsuranceType::Pet => "pet",
            InsuranceType::Cyber => "cyber",
            InsuranceType::Other => "other",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsuranceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsuranceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub fullName: String,
    pub email: String,
    pub phoneNumber: String,
    pub insuranceType: InsuranceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additionalInfo: Option<String>,
    #[serde(default)]
    pub createdAt: Option<String>,
    #[serde(default)]
    pub updatedAt: Option<String>,
}

impl Record for Quote {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn prepare_insert(&mut self, id: ObjectId, now: String) {
        self.id = Some(id);
        self.createdAt = Some(now.clone());
        self.updatedAt = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insurance_type_round_trips_through_str() {
        for t in InsuranceType::ALL {
            assert_eq!(t.as_str().parse::<InsuranceType>(), Ok(t));
        }
    }

    #[test]
    fn test_insurance_type_serde_matches_as_str() {
        for t in InsuranceType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, serde_json::Value::String(t.as_str().to_string()));
        }
    }

    #[test]
    fn test_unknown_insurance_type_rejected() {
        assert!("Health".parse::<InsuranceType>().is_err());
        assert!("boat".parse::<InsuranceType>().is_err());
        assert!("".parse::<InsuranceType>().is_err());
    }
}
