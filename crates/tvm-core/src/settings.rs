//! Global library settings.
//!
//! [`Settings`] holds the **evaluation date** — the date every
//! date-defaulted operation treats as "today".  It is a process-wide
//! singleton accessed via a `std::sync::OnceLock`.  When no evaluation date
//! has been set, the system clock is used.
//!
//! Thread safety: the evaluation date is stored behind a `Mutex` so that it
//! can be changed from any thread.  Tests that pin the evaluation date
//! should restore it when done.

use chrono::NaiveDate;
use std::sync::{Mutex, OnceLock};

/// Process-wide settings used by the tvm-rs library.
///
/// Currently the only setting is the evaluation date.  Ledgers use it as
/// the default reference date for balance, status, and payment-registration
/// queries.
pub struct Settings {
    evaluation_date: Mutex<Option<NaiveDate>>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            evaluation_date: Mutex::new(None),
        })
    }

    /// The current evaluation date, falling back to the system clock when
    /// none has been pinned.
    pub fn evaluation_date(&self) -> NaiveDate {
        self.evaluation_date
            .lock()
            .expect("Settings mutex poisoned")
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Pin the evaluation date.
    pub fn set_evaluation_date(&self, date: NaiveDate) {
        *self
            .evaluation_date
            .lock()
            .expect("Settings mutex poisoned") = Some(date);
    }

    /// Clear the evaluation date, resetting it to "use the system clock".
    pub fn reset_evaluation_date(&self) {
        *self
            .evaluation_date
            .lock()
            .expect("Settings mutex poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_date_round_trips() {
        let settings = Settings::instance();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        settings.set_evaluation_date(date);
        assert_eq!(settings.evaluation_date(), date);
        settings.reset_evaluation_date();
    }
}
