//! Clinical categorization of FHIR resources.
//!
//! Every concrete resource kind maps to exactly one of nine coarse clinical
//! categories used for partitioning and filtering. The two schema versions
//! carry independent classification tables because their kind sets differ
//! (DSTU2 has `DiagnosticOrder` where R4 does not; DSTU2 has no
//! `ObservationDefinition`). Kinds without an explicit mapping fall back to
//! [`ResourceCategory::Other`].

use crate::error::CoreError;
use crate::{dstu2, r4};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse clinical grouping of a FHIR resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceCategory {
    Observation,
    Encounter,
    Condition,
    Diagnostic,
    Procedure,
    Immunization,
    AllergyIntolerance,
    Medication,
    Other,
}

impl ResourceCategory {
    /// All nine categories, in declaration order.
    pub const ALL: [ResourceCategory; 9] = [
        ResourceCategory::Observation,
        ResourceCategory::Encounter,
        ResourceCategory::Condition,
        ResourceCategory::Diagnostic,
        ResourceCategory::Procedure,
        ResourceCategory::Immunization,
        ResourceCategory::AllergyIntolerance,
        ResourceCategory::Medication,
        ResourceCategory::Other,
    ];

    /// Returns the string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Observation => "observation",
            ResourceCategory::Encounter => "encounter",
            ResourceCategory::Condition => "condition",
            ResourceCategory::Diagnostic => "diagnostic",
            ResourceCategory::Procedure => "procedure",
            ResourceCategory::Immunization => "immunization",
            ResourceCategory::AllergyIntolerance => "allergyIntolerance",
            ResourceCategory::Medication => "medication",
            ResourceCategory::Other => "other",
        }
    }

    /// Classification table for R4 resource kinds.
    pub fn of_r4(kind: r4::ResourceKind) -> Self {
        use r4::ResourceKind as K;
        match kind {
            K::AllergyIntolerance => ResourceCategory::AllergyIntolerance,
            K::Condition => ResourceCategory::Condition,
            K::DiagnosticReport => ResourceCategory::Diagnostic,
            K::Encounter => ResourceCategory::Encounter,
            K::Immunization | K::ImmunizationEvaluation | K::ImmunizationRecommendation => {
                ResourceCategory::Immunization
            }
            K::Medication
            | K::MedicationAdministration
            | K::MedicationDispense
            | K::MedicationKnowledge
            | K::MedicationRequest
            | K::MedicationStatement => ResourceCategory::Medication,
            K::Observation | K::ObservationDefinition => ResourceCategory::Observation,
            K::Procedure => ResourceCategory::Procedure,
            _ => ResourceCategory::Other,
        }
    }

    /// Classification table for DSTU2 resource kinds.
    pub fn of_dstu2(kind: dstu2::ResourceKind) -> Self {
        use dstu2::ResourceKind as K;
        match kind {
            K::AllergyIntolerance => ResourceCategory::AllergyIntolerance,
            K::Condition => ResourceCategory::Condition,
            K::DiagnosticReport | K::DiagnosticOrder => ResourceCategory::Diagnostic,
            K::Encounter => ResourceCategory::Encounter,
            K::Immunization | K::ImmunizationRecommendation => ResourceCategory::Immunization,
            K::Medication
            | K::MedicationAdministration
            | K::MedicationDispense
            | K::MedicationOrder
            | K::MedicationStatement => ResourceCategory::Medication,
            K::Observation => ResourceCategory::Observation,
            K::Procedure | K::ProcedureRequest => ResourceCategory::Procedure,
            _ => ResourceCategory::Other,
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "observation" => Ok(ResourceCategory::Observation),
            "encounter" => Ok(ResourceCategory::Encounter),
            "condition" => Ok(ResourceCategory::Condition),
            "diagnostic" => Ok(ResourceCategory::Diagnostic),
            "procedure" => Ok(ResourceCategory::Procedure),
            "immunization" => Ok(ResourceCategory::Immunization),
            "allergyIntolerance" => Ok(ResourceCategory::AllergyIntolerance),
            "medication" => Ok(ResourceCategory::Medication),
            "other" => Ok(ResourceCategory::Other),
            _ => Err(CoreError::unknown_category(s)),
        }
    }
}
