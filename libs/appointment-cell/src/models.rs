use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_models::error::ApiError;

/// Body of `POST /citas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: String,
    pub description: String,
    #[serde(rename = "doctorId")]
    pub doctor_id: i64,
}

impl BookingRequest {
    /// Request for one slot of a doctor. Falls back to "Doctor" when the name
    /// is unknown.
    pub fn for_slot(date: impl Into<String>, doctor_name: Option<&str>, doctor_id: i64) -> Self {
        Self {
            date: date.into(),
            description: format!("Cita con {}", doctor_name.unwrap_or("Doctor")),
            doctor_id,
        }
    }
}

/// Whatever the backend answered on acceptance; its shape is not relied on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub body: Value,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("A stored session with a bearer token is required to book")]
    LoginRequired,

    #[error("Schedule slot {0} is not among the loaded slots")]
    SlotNotFound(i64),

    #[error("Another booking is already in flight")]
    InProgress,

    #[error("Booking rejected: {0}")]
    Rejected(#[from] ApiError),
}

impl BookingError {
    /// The slot was taken by someone else between listing and booking.
    pub fn is_conflict(&self) -> bool {
        matches!(self, BookingError::Rejected(e) if e.is_conflict())
    }
}
