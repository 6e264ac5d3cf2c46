//! Weekly planner domain
//!
//! - `day_map`: the seven-slot record of one week
//! - `calendar_store`: week addressing, day projection and remote binding

mod calendar_store;
mod day_map;

pub use calendar_store::{CalendarStore, DayEntry, local_date_today};
pub use day_map::{DayMap, WeekTable, week_days, weekday_name};
