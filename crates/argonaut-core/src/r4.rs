//! R4 resource shapes.
//!
//! Only identifiers and the date-bearing fields consulted by the extraction
//! rules are modeled explicitly; everything else a resource carries rides in
//! the flattened `extra` map, so serialization round-trips are lossless.

use crate::macros::{resource_model, simple_resources};
use crate::time::{FhirDateTime, Period};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

resource_model! {
    AllergyIntolerance,
    CarePlan,
    CareTeam,
    Claim,
    Condition,
    Device,
    DiagnosticReport,
    DocumentReference,
    Encounter,
    ExplanationOfBenefit,
    Immunization,
    ImmunizationEvaluation,
    ImmunizationRecommendation,
    Location,
    Medication,
    MedicationAdministration,
    MedicationDispense,
    MedicationKnowledge,
    MedicationRequest,
    MedicationStatement,
    Observation,
    ObservationDefinition,
    Organization,
    Patient,
    Practitioner,
    Procedure,
    Provenance,
    ServiceRequest,
    SupplyDelivery,
}

simple_resources! {
    "R4":
    AllergyIntolerance,
    ImmunizationEvaluation,
    ImmunizationRecommendation,
    Location,
    Medication,
    MedicationDispense,
    MedicationKnowledge,
    MedicationStatement,
    ObservationDefinition,
    Organization,
    Practitioner,
    ServiceRequest,
}

/// R4 `CarePlan` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `CareTeam` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTeam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Claim` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Condition` resource with its `onset[x]` choice spelled out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_range: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_string: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Device` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `DiagnosticReport` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `DocumentReference` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Encounter` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `ExplanationOfBenefit` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationOfBenefit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billable_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Immunization` resource with its `occurrence[x]` choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_string: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `MedicationAdministration` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationAdministration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `MedicationRequest` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored_on: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Observation` resource with `issued` and the `effective[x]` choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_instant: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_timing: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Patient` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Procedure` resource with its `performed[x]` choice spelled out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_age: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_range: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_string: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `Provenance` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R4 `SupplyDelivery` resource with its `occurrence[x]` choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_timing: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
