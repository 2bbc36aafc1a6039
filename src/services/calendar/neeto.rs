use async_trait::async_trait;
use serde_json::json;

use super::{BookingFilters, BookingRequest, CalendarProvider, SlotsResponse};
use crate::errors::AppError;

pub struct NeetoCalClient {
    api_key: String,
    base_url: String,
    meeting_slug: String,
    time_zone: String,
    client: reqwest::Client,
}

impl NeetoCalClient {
    pub fn new(
        api_key: String,
        workspace: String,
        meeting_slug: String,
        time_zone: String,
    ) -> Self {
        Self {
            api_key,
            base_url: format!("https://{workspace}.neetocal.com/api/external/v1"),
            meeting_slug,
            time_zone,
            client: reqwest::Client::new(),
        }
    }

    async fn check(&self, resp: reqwest::Response) -> Result<serde_json::Value, AppError> {
        let status = resp.status();
        let body: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl CalendarProvider for NeetoCalClient {
    async fn list_monthly_slots(&self, year: i32, month: u32) -> Result<SlotsResponse, AppError> {
        let url = format!("{}/slots/{}", self.base_url, self.meeting_slug);
        let resp = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("year", year.to_string()),
                ("month", month.to_string()),
                ("time_zone", self.time_zone.clone()),
            ])
            .send()
            .await?;

        let body = self.check(resp).await?;
        serde_json::from_value(body).map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/bookings", self.base_url);
        let payload = json!({
            "meeting_slug": self.meeting_slug,
            "name": request.name,
            "email": request.email,
            "slot_date": request.slot_date,
            "slot_start_time": request.slot_start_time,
            "time_zone": self.time_zone,
            "form_responses": request.form_responses,
        });

        let resp = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        self.check(resp).await
    }

    async fn list_bookings(
        &self,
        filters: &BookingFilters,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/bookings", self.base_url);
        let mut params: Vec<(&str, String)> = vec![];
        if let Some(host) = &filters.host_email {
            params.push(("host_email", host.clone()));
        }
        if let Some(client) = &filters.client_email {
            params.push(("client_email", client.clone()));
        }
        if let Some(kind) = &filters.booking_type {
            params.push(("type", kind.clone()));
        }

        let resp = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await?;

        self.check(resp).await
    }

    async fn cancel_booking(
        &self,
        booking_id: &str,
        reason: Option<&str>,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/bookings/{}/cancel", self.base_url, booking_id);
        let mut params: Vec<(&str, String)> = vec![];
        if let Some(reason) = reason {
            params.push(("cancel_reason", reason.to_string()));
        }

        let resp = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await?;

        self.check(resp).await
    }
}
