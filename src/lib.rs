//! Fair monthly duty rotation.
//!
//! Assigns one person per group per calendar day and tracks how evenly the
//! workload is spread. Days are classified (regular, Friday, weekend,
//! holiday, long-weekend middle) and weighted, so a holiday shift counts for
//! more than a Tuesday.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Group`, `Member`, `PersonConstraint`,
//!   `Holiday`, `HolidayCalendar`, `DayType`, `Schedule`
//! - **`weighting`**: Day classification and weights
//! - **`selection`**: Composable rules choosing who takes a day
//! - **`scheduler`**: The month-long greedy `RotationEngine`
//! - **`ledger`**: Append-only assignment history, stats, fairness metrics
//! - **`registry`**: In-memory roster and holiday stores (TOML / CSV)
//! - **`validation`**: Roster integrity checks
//! - **`config`**: `RotationConfig` (defaults, TOML, environment)
//! - **`error`**: `RotationError`
//!
//! # Example
//!
//! ```
//! use u_rotation::ledger::FairnessLedger;
//! use u_rotation::models::{Group, Holiday};
//! use u_rotation::registry::Roster;
//! use u_rotation::scheduler::RotationEngine;
//! use chrono::NaiveDate;
//!
//! let roster = Roster::new()
//!     .with_group(Group::new("ward").with_member("alice").with_member("bob"))
//!     .unwrap();
//! let holidays = [Holiday::single(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())];
//! let mut ledger = FairnessLedger::new();
//!
//! let schedule = RotationEngine::new()
//!     .generate_monthly_schedule(&roster, 2024, 1, &holidays, &mut ledger)
//!     .unwrap();
//!
//! let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! assert_eq!(schedule.person_for(new_year, "ward"), Some("alice"));
//! let metrics = ledger.fairness_metrics("ward");
//! assert_eq!(metrics.max_total_diff, 1);
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod scheduler;
pub mod selection;
pub mod validation;
pub mod weighting;

pub use error::{Result, RotationError};
