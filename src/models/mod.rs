//! Rotation domain models.
//!
//! Provides the core data types for describing a rotation problem
//! (groups, members, constraints, holidays) and its solution (schedule).
//!
//! # Domain Mappings
//!
//! | u-rotation | On-call | Healthcare | Facilities |
//! |------------|---------|------------|------------|
//! | Group | Escalation tier | Ward | Building |
//! | Member | Engineer | Nurse | Caretaker |
//! | Holiday | Company holiday | Public holiday | Closure |
//! | Schedule | Pager rota | Duty roster | Key-holder rota |

mod constraint;
mod day_type;
mod group;
pub mod holiday;
mod schedule;

pub use constraint::PersonConstraint;
pub use day_type::DayType;
pub use group::{Group, Member};
pub use holiday::{Holiday, HolidayCalendar, LongPeriod};
pub use schedule::{Fallback, Schedule, ScheduledShift};
