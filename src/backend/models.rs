//! Data structures for the API surface.

use serde::{Deserialize, Serialize};

use crate::models::{PatientData, Verdict};

/// Query parameters accepted by the sort endpoint.
#[derive(Deserialize)]
pub struct SortQuery {
    pub sort_by: String,
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_owned()
}

/// A record as returned by the API: the stored fields plus the derived
/// values, recomputed on every read.
#[derive(Serialize)]
pub struct PatientView<'a> {
    #[serde(flatten)]
    record: &'a PatientData,
    bmi: f64,
    verdict: Verdict,
}

impl<'a> PatientView<'a> {
    pub fn new(record: &'a PatientData) -> Self {
        Self {
            record,
            bmi: record.bmi(),
            verdict: record.verdict(),
        }
    }
}
