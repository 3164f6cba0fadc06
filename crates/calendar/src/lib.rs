//! # psm-calendar
//!
//! Date arithmetic for simulation time axes on the 365-day no-leap
//! calendar, plus the month sets behind habitat seasons.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["(year, month, day)"] -->|"SimDate::new()"| B["SimDate"]
//!     B -->|".next_month()"| B
//!     B -->|"monthly_sequence()"| C["Vec of SimDate"]
//!     D["Season + latitude"] -->|"season_months()"| E["[u8; 3]"]
//!     F["raw month list"] -->|"validate_months()"| G["sorted, deduplicated months"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use psm_calendar::{Season, SimDate, monthly_sequence, season_months};
//!
//! let start = SimDate::new(-21000, 1, 15).unwrap();
//! let dates = monthly_sequence(start, 24);
//!
//! // Southern-hemisphere summer is December-February.
//! assert_eq!(season_months(Season::Summer, -10.0), [12, 1, 2]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | No-leap date with year context |
//! | `month` | Month validation and month-length table |
//! | `season` | Named seasons, hemispheres, season months |
//! | `sequence` | Daily and monthly date sequences |
//! | `error` | Error types |

mod date;
mod error;
mod month;
mod season;
mod sequence;

pub use date::SimDate;
pub use error::CalendarError;
pub use month::{days_in_month, validate_months};
pub use season::{Hemisphere, Season, season_months};
pub use sequence::{daily_sequence, monthly_sequence};
