use serde::{Deserialize, Serialize};

/// A bookable time window, normalized from the calendar's monthly listing.
///
/// `display` is the user-facing label, e.g. `"2024-11-11: 10:30 AM - 11:00 AM"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotOption {
    pub display: String,
    pub date: String,
    pub time_range: String,
}
