use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::AppError;
use crate::models::SlotOption;
use crate::services::calendar::{CalendarProvider, SlotsResponse};

/// Fetch availability for a window of days starting at `start`.
///
/// The upstream endpoint is month-granular, so each day issues a listing for
/// that day's year/month; stepping a day at a time only changes the request at
/// month boundaries. The first successful response wins and is returned as-is;
/// this is not an aggregation across the window. Per-day failures are logged
/// and skipped; if every day fails the result is empty.
pub async fn list_slots_for_next_days(
    calendar: &dyn CalendarProvider,
    start: NaiveDate,
    days: u32,
) -> Vec<SlotOption> {
    for offset in 0..days {
        let day = start + Duration::days(offset as i64);
        match calendar.list_monthly_slots(day.year(), day.month()).await {
            Ok(response) => return slot_options(&response),
            Err(e) => {
                tracing::warn!(date = %day, error = %e, "failed to fetch slots, trying next day");
            }
        }
    }
    vec![]
}

/// Normalize a monthly listing into selectable options, keeping only
/// available windows.
pub fn slot_options(response: &SlotsResponse) -> Vec<SlotOption> {
    let mut options = vec![];
    for day in &response.slots {
        for (time_range, detail) in &day.slots {
            if detail.is_available {
                options.push(SlotOption {
                    display: format!("{}: {} - {}", day.date, detail.start_time, detail.end_time),
                    date: day.date.clone(),
                    time_range: time_range.clone(),
                });
            }
        }
    }
    options
}

/// Recover the booking date and start time from a display label of the form
/// `"<date>: <start> - <end>"`.
pub fn parse_slot_label(label: &str) -> Result<(String, String), AppError> {
    let (date, times) = label
        .split_once(": ")
        .ok_or_else(|| AppError::InvalidSlot(format!("malformed slot label: {label}")))?;
    let (start, _end) = times
        .split_once(" - ")
        .ok_or_else(|| AppError::InvalidSlot(format!("malformed slot label: {label}")))?;
    Ok((date.trim().to_string(), start.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::services::calendar::{BookingFilters, BookingRequest};

    struct FlakyCalendar {
        calls: AtomicU32,
        fail_first: u32,
    }

    impl FlakyCalendar {
        fn new(fail_first: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CalendarProvider for FlakyCalendar {
        async fn list_monthly_slots(
            &self,
            _year: i32,
            _month: u32,
        ) -> Result<SlotsResponse, AppError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.fail_first {
                return Err(AppError::Upstream {
                    status: 500,
                    body: json!({"error": "calendar unavailable"}),
                });
            }
            Ok(sample_response())
        }

        async fn create_booking(
            &self,
            _request: &BookingRequest,
        ) -> Result<serde_json::Value, AppError> {
            unimplemented!("not used in these tests")
        }

        async fn list_bookings(
            &self,
            _filters: &BookingFilters,
        ) -> Result<serde_json::Value, AppError> {
            unimplemented!("not used in these tests")
        }

        async fn cancel_booking(
            &self,
            _booking_id: &str,
            _reason: Option<&str>,
        ) -> Result<serde_json::Value, AppError> {
            unimplemented!("not used in these tests")
        }
    }

    fn sample_response() -> SlotsResponse {
        serde_json::from_value(json!({
            "slots": [
                {
                    "date": "2024-11-11",
                    "slots": {
                        "10:30 AM - 11:00 AM": {
                            "is_available": true,
                            "start_time": "10:30 AM",
                            "end_time": "11:00 AM"
                        },
                        "11:00 AM - 11:30 AM": {
                            "is_available": false,
                            "start_time": "11:00 AM",
                            "end_time": "11:30 AM"
                        }
                    }
                },
                {
                    "date": "2024-11-12",
                    "slots": {
                        "9:00 AM - 9:30 AM": {
                            "is_available": true,
                            "start_time": "9:00 AM",
                            "end_time": "9:30 AM"
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    fn start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 10).unwrap()
    }

    #[test]
    fn test_slot_options_filters_unavailable() {
        let options = slot_options(&sample_response());
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].display, "2024-11-11: 10:30 AM - 11:00 AM");
        assert_eq!(options[0].date, "2024-11-11");
        assert_eq!(options[0].time_range, "10:30 AM - 11:00 AM");
        assert_eq!(options[1].display, "2024-11-12: 9:00 AM - 9:30 AM");
    }

    #[test]
    fn test_parse_slot_label() {
        let (date, start) = parse_slot_label("2024-11-11: 10:30 AM - 11:00 AM").unwrap();
        assert_eq!(date, "2024-11-11");
        assert_eq!(start, "10:30 AM");
    }

    #[test]
    fn test_parse_slot_label_malformed() {
        assert!(parse_slot_label("not a slot").is_err());
        assert!(parse_slot_label("2024-11-11: all day").is_err());
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        // Days 1-2 fail, day 3 succeeds; days 4-7 must not be queried.
        let calendar = FlakyCalendar::new(2);
        let options = list_slots_for_next_days(&calendar, start_date(), 7).await;
        assert_eq!(options.len(), 2);
        assert_eq!(calendar.calls(), 3);
    }

    #[tokio::test]
    async fn test_all_days_fail_returns_empty() {
        let calendar = FlakyCalendar::new(u32::MAX);
        let options = list_slots_for_next_days(&calendar, start_date(), 7).await;
        assert!(options.is_empty());
        assert_eq!(calendar.calls(), 7);
    }

    #[tokio::test]
    async fn test_immediate_success_queries_once() {
        let calendar = FlakyCalendar::new(0);
        let options = list_slots_for_next_days(&calendar, start_date(), 7).await;
        assert_eq!(options.len(), 2);
        assert_eq!(calendar.calls(), 1);
    }
}
