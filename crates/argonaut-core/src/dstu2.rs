//! DSTU2 resource shapes.
//!
//! Mirrors the R4 module with the DSTU2 kind set and field names: DSTU2 has
//! `DiagnosticOrder`, `ProcedureRequest` and `MedicationOrder` where R4 does
//! not, writes `MedicationOrder.dateWritten` instead of
//! `MedicationRequest.authoredOn`, and dates immunizations through a plain
//! `date` field rather than an `occurrence[x]` choice.

use crate::macros::{resource_model, simple_resources};
use crate::time::{FhirDateTime, Period};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

resource_model! {
    AllergyIntolerance,
    CarePlan,
    Condition,
    Device,
    DiagnosticOrder,
    DiagnosticReport,
    DocumentReference,
    Encounter,
    Immunization,
    ImmunizationRecommendation,
    Medication,
    MedicationAdministration,
    MedicationDispense,
    MedicationOrder,
    MedicationStatement,
    Observation,
    Organization,
    Patient,
    Practitioner,
    Procedure,
    ProcedureRequest,
    SupplyDelivery,
}

simple_resources! {
    "DSTU2":
    AllergyIntolerance,
    DiagnosticOrder,
    ImmunizationRecommendation,
    Medication,
    MedicationDispense,
    Organization,
    Practitioner,
    ProcedureRequest,
}

/// DSTU2 `CarePlan` resource.
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

/// DSTU2 `Condition` resource with its `onset[x]` choice spelled out.
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

/// DSTU2 `Device` resource.
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

/// DSTU2 `DiagnosticReport` resource.
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

/// DSTU2 `DocumentReference` resource; dated by `created`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `Encounter` resource.
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

/// DSTU2 `Immunization` resource; dated by a plain `date` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `MedicationAdministration` resource with its `effectiveTime[x]`
/// choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationAdministration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `MedicationOrder` resource; dated by `dateWritten`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_written: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `MedicationStatement` resource with its `effective[x]` choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationStatement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `Observation` resource with `issued` and the `effective[x]` choice.
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
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `Patient` resource.
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

/// DSTU2 `Procedure` resource with its `performed[x]` choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_date_time: Option<FhirDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_period: Option<Period>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// DSTU2 `SupplyDelivery` resource; dated by `time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<FhirDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
