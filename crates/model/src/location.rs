use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::pincode::Pincode;

/// Coordinates a pincode was geocoded to. Created once per pincode and never
/// updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub pincode: Pincode,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl HasId for Location {
    type IdType = i32;
}

impl Location {
    pub fn new(pincode: Pincode, latitude: f64, longitude: f64) -> Self {
        Self {
            pincode,
            latitude,
            longitude,
            created_at: Utc::now(),
        }
    }
}
