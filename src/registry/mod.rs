//! In-memory registries the rotation engine reads from.
//!
//! | Registry | Holds | Loaded from |
//! |----------|-------|-------------|
//! | [`Roster`] | Groups, members, constraints | TOML |
//! | [`HolidayRegistry`] | Holidays by id | CSV |

mod holidays;
mod roster;

pub use holidays::{HolidayEntry, HolidayRegistry, CSV_HEADER};
pub use roster::Roster;
