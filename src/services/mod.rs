pub mod ai;
pub mod calendar;
pub mod conversation;
pub mod scheduling;
