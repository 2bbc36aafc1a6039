pub mod neeto;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Monthly availability listing as returned by the calendar API.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotsResponse {
    #[serde(default)]
    pub slots: Vec<DaySlots>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaySlots {
    pub date: String,
    /// Keyed by time range, e.g. "10:30 AM - 11:00 AM".
    #[serde(default)]
    pub slots: BTreeMap<String, SlotDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotDetail {
    pub is_available: bool,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub slot_date: String,
    pub slot_start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_responses: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilters {
    pub host_email: Option<String>,
    pub client_email: Option<String>,
    #[serde(rename = "type")]
    pub booking_type: Option<String>,
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn list_monthly_slots(&self, year: i32, month: u32) -> Result<SlotsResponse, AppError>;

    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<serde_json::Value, AppError>;

    async fn list_bookings(
        &self,
        filters: &BookingFilters,
    ) -> Result<serde_json::Value, AppError>;

    async fn cancel_booking(
        &self,
        booking_id: &str,
        reason: Option<&str>,
    ) -> Result<serde_json::Value, AppError>;
}
