//! Best-effort extraction of the clinically relevant timestamp of a
//! resource.
//!
//! There is no general rule: each kind names the field (and, for choice
//! types, the single variant) that counts as its date. Kinds without an
//! entry, non-dateTime choice variants and malformed primitives all yield
//! `None` — incomplete clinical data degrades, it never errors.

use crate::time::Period;
use crate::{dstu2, r4};
use time::OffsetDateTime;

/// Date extraction table for R4 resources.
///
/// Narrowings here are intentional: `Observation` consults `issued` first
/// and otherwise only `effectiveDateTime` (never the period, instant or
/// timing variants); `Condition` and `Procedure` only honor the dateTime
/// variant of their choice fields, except that a `performedPeriod` dates a
/// procedure by its end.
pub fn of_r4(resource: &r4::Resource) -> Option<OffsetDateTime> {
    use r4::Resource as R;
    match resource {
        R::CarePlan(plan) => plan.period.as_ref().and_then(Period::date),
        R::CareTeam(team) => team.period.as_ref().and_then(Period::date),
        R::Claim(claim) => claim.billable_period.as_ref().and_then(Period::end_date),
        R::Condition(condition) => condition.onset_date_time.as_ref()?.to_utc(),
        R::Device(device) => device.manufacture_date.as_ref()?.to_utc(),
        R::DiagnosticReport(report) => report.effective_date_time.as_ref()?.to_utc(),
        R::DocumentReference(reference) => reference.date.as_ref()?.to_utc(),
        R::Encounter(encounter) => encounter.period.as_ref().and_then(Period::end_date),
        R::ExplanationOfBenefit(eob) => eob.billable_period.as_ref().and_then(Period::end_date),
        R::Immunization(immunization) => immunization.occurrence_date_time.as_ref()?.to_utc(),
        R::MedicationAdministration(administration) => {
            administration.effective_date_time.as_ref()?.to_utc()
        }
        R::MedicationRequest(request) => request.authored_on.as_ref()?.to_utc(),
        R::Observation(observation) => match &observation.issued {
            Some(issued) => issued.to_utc(),
            None => observation.effective_date_time.as_ref()?.to_utc(),
        },
        R::Patient(patient) => patient.birth_date.as_ref()?.to_utc(),
        R::Procedure(procedure) => match (&procedure.performed_date_time, &procedure.performed_period) {
            (Some(datetime), _) => datetime.to_utc(),
            (None, Some(period)) => period.end_date(),
            (None, None) => None,
        },
        R::Provenance(provenance) => provenance.recorded.as_ref()?.to_utc(),
        R::SupplyDelivery(delivery) => delivery.occurrence_date_time.as_ref()?.to_utc(),
        _ => None,
    }
}

/// Date extraction table for DSTU2 resources, mirroring the R4 rules with
/// DSTU2 field names (`MedicationOrder.dateWritten`,
/// `MedicationAdministration.effectiveTime[x]`, `Immunization.date`,
/// `SupplyDelivery.time`).
pub fn of_dstu2(resource: &dstu2::Resource) -> Option<OffsetDateTime> {
    use dstu2::Resource as R;
    match resource {
        R::CarePlan(plan) => plan.period.as_ref().and_then(Period::date),
        R::Condition(condition) => condition.onset_date_time.as_ref()?.to_utc(),
        R::Device(device) => device.manufacture_date.as_ref()?.to_utc(),
        R::DiagnosticReport(report) => report.effective_date_time.as_ref()?.to_utc(),
        R::DocumentReference(reference) => reference.created.as_ref()?.to_utc(),
        R::Encounter(encounter) => encounter.period.as_ref().and_then(Period::end_date),
        R::Immunization(immunization) => immunization.date.as_ref()?.to_utc(),
        R::MedicationAdministration(administration) => {
            administration.effective_time_date_time.as_ref()?.to_utc()
        }
        R::MedicationOrder(order) => order.date_written.as_ref()?.to_utc(),
        R::MedicationStatement(statement) => statement.effective_date_time.as_ref()?.to_utc(),
        R::Observation(observation) => match &observation.issued {
            Some(issued) => issued.to_utc(),
            None => observation.effective_date_time.as_ref()?.to_utc(),
        },
        R::Patient(patient) => patient.birth_date.as_ref()?.to_utc(),
        R::Procedure(procedure) => match (&procedure.performed_date_time, &procedure.performed_period) {
            (Some(datetime), _) => datetime.to_utc(),
            (None, Some(period)) => period.end_date(),
            (None, None) => None,
        },
        R::SupplyDelivery(delivery) => delivery.time.as_ref()?.to_utc(),
        _ => None,
    }
}
