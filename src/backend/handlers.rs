//! Request handlers for the patient API.
//! Maps validator and store outcomes to HTTP responses: validation
//! failures to 422, id conflicts to 409, lookup misses to 404, and
//! disallowed sort parameters to 400.

use axum::extract::{Json, Path, Query};
use http::StatusCode;
use log::{error, info};
use serde_json::{json, Value};

use crate::database;
use crate::models::{PatientId, SortField, SortOrder};
use crate::utils::error_messages::{
    CONFLICT_ERROR, ID_ERROR, NOT_FOUND_ERROR, STORE_ERROR, VALIDATION_ERROR,
};
use crate::utils::validation::record::validate_patient;

use super::models::{PatientView, SortQuery};

/// Service banner
pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Patient registry is running" }))
}

/// Returns the full mapping of patient id to record
pub async fn list_patients() -> axum::response::Result<Json<Value>> {
    let patients = database::get_all().map_err(|error| {
        error!("Failed to read the patient store: {error}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": STORE_ERROR })),
        )
    })?;

    let data: serde_json::Map<String, Value> = patients
        .iter()
        .map(|(id, record)| (id.to_string(), json!(PatientView::new(record))))
        .collect();

    Ok(Json(json!({ "data": data })))
}

/// Returns a single patient record
pub async fn view_patient(
    Path(patient_id): Path<String>,
) -> axum::response::Result<Json<Value>> {
    let id = PatientId::try_from(patient_id.as_str())
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(json!({ "detail": ID_ERROR }))))?;

    match database::get(&id) {
        Some(record) => Ok(Json(json!({ "patient": PatientView::new(&record) }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": NOT_FOUND_ERROR })),
        )
            .into()),
    }
}

/// Returns all records ordered by an allow-listed field
pub async fn sort_patients(
    Query(query): Query<SortQuery>,
) -> axum::response::Result<Json<Value>> {
    let Some(field) = SortField::parse(&query.sort_by) else {
        let detail = format!(
            "Invalid sort field, must be one of: {}",
            SortField::ALLOWED.join(", ")
        );
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into());
    };

    let Some(order) = SortOrder::parse(&query.order) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid order, must be 'asc' or 'desc'" })),
        )
            .into());
    };

    let patients = database::get_all().map_err(|error| {
        error!("Failed to read the patient store: {error}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": STORE_ERROR })),
        )
    })?;

    let mut records: Vec<_> = patients.into_values().collect();
    records.sort_by(|a, b| {
        let ordering = a.sort_key(field).total_cmp(&b.sort_key(field));
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    let sorted: Vec<Value> = records
        .iter()
        .map(|record| json!(PatientView::new(record)))
        .collect();

    Ok(Json(json!({ "sorted_patients": sorted })))
}

/// Validates and stores a new patient record
pub async fn create_patient(
    Json(payload): Json<Value>,
) -> axum::response::Result<(StatusCode, Json<Value>)> {
    // Extract and validate the id first; the rest of the payload goes
    // through record validation as one unit
    let raw_id = payload
        .get("id")
        .and_then(Value::as_str)
        .ok_or((StatusCode::BAD_REQUEST, Json(json!({ "detail": ID_ERROR }))))?;

    let id = PatientId::try_from(raw_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, Json(json!({ "detail": ID_ERROR }))))?;

    let record = validate_patient(&payload).map_err(|errors| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": VALIDATION_ERROR, "errors": errors.errors() })),
        )
    })?;

    let created = database::create(id.clone(), record.clone()).map_err(|error| {
        error!("Failed to persist patient record: {error}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": STORE_ERROR })),
        )
    })?;

    if !created {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "detail": CONFLICT_ERROR })),
        )
            .into());
    }

    info!("Created patient record {id}");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Patient created successfully",
            "patient": PatientView::new(&record),
        })),
    ))
}
