use crate::routes::{bunches, health, medicines, patients};
use api_shared::{ErrorRes, HealthRes, MessageRes};
use clinic_core::models::{
    BunchInput, BunchView, FollowUp, HealthConcerns, Medicine, MedicineGroup, Patient,
    SubMedicine, Timings,
};
use utoipa::OpenApi;

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        patients::list_patients,
        patients::create_patient,
        patients::get_patient,
        patients::update_patient,
        patients::delete_patient,
        patients::add_follow_up,
        patients::update_follow_up,
        patients::delete_follow_up,
        medicines::list_medicines,
        medicines::create_medicine,
        medicines::update_medicine,
        medicines::delete_medicine,
        bunches::list_bunches,
        bunches::create_bunch,
        bunches::update_bunch,
        bunches::delete_bunch,
    ),
    components(schemas(
        HealthRes,
        MessageRes,
        ErrorRes,
        Patient,
        HealthConcerns,
        FollowUp,
        MedicineGroup,
        SubMedicine,
        Timings,
        Medicine,
        BunchView,
        BunchInput,
    ))
)]
pub struct ApiDoc;
