//! The in-game calendar.
//!
//! The game exposes one float: elapsed days since the clock engine started,
//! integer part days, fractional part the time of day. Everything else
//! (year, month, weekday, h:m:s) is derived from it on every formatting
//! call and never stored.

mod names;

pub use names::{Month, Weekday};

/// Days between raw day zero and the start of year 201.
///
/// Shifts the counter so that day zero lands on the 17th of Last Seed, the
/// in-universe start date.
pub const EPOCH_DAY_OFFSET: i32 = 228;

/// Year the shifted counter starts in.
pub const EPOCH_BASE_YEAR: i32 = 201;

/// Offset aligning the shifted day counter with the weekday cycle.
pub const EPOCH_WEEKDAY_SHIFT: i32 = 3;

/// Era prefix for the long year form (`%Y`).
pub const ERA_PREFIX: &str = "4E";

/// A calendar/time tuple derived from the raw epoch float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    /// Shifted day counter (raw integer part + [`EPOCH_DAY_OFFSET`]).
    pub day_index: i32,
    pub year: i32,
    /// 1-based day within the 365-day year.
    pub year_day: i32,
    pub month: Month,
    /// 1-based day within the month.
    pub month_day: i32,
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// The raw epoch value the rest was derived from.
    pub raw: f32,
}

impl CalendarDate {
    /// Derive the full calendar tuple from the raw epoch float.
    ///
    /// Zero, negative, sub-normal and non-finite values mean the clock is
    /// not running (main menu, unbound pointer) and yield `None`.
    ///
    /// The time of day is a mixed-radix decomposition of the day fraction,
    /// truncating at every step and carrying the remainder forward, so the
    /// reconstructed h:m:s never overshoots the input fraction.
    pub fn from_epoch(raw: f32) -> Option<Self> {
        if !raw.is_normal() || raw < 0.0 {
            return None;
        }

        let mut hms = raw - raw.trunc();
        hms *= 24.0;
        let hour = hms.trunc();
        hms -= hour;
        hms *= 60.0;
        let minute = hms.trunc();
        hms -= minute;
        let second = (hms * 60.0).trunc();

        let day_index = raw as i32 + EPOCH_DAY_OFFSET;
        let year = day_index / 365 + EPOCH_BASE_YEAR;
        let year_day = day_index % 365 + 1;
        let weekday = Weekday::from_index(((day_index + EPOCH_WEEKDAY_SHIFT) % 7) as u8)
            .expect("modulo 7 stays in range");
        let (month, month_day) = Month::from_year_day(year_day);

        Some(Self {
            day_index,
            year,
            year_day,
            month,
            month_day,
            weekday,
            hour: hour as u32,
            minute: minute as u32,
            second: second as u32,
            raw,
        })
    }

    /// Year in its long era form, e.g. `4E201`.
    pub fn long_year(&self) -> String {
        format!("{}{}", ERA_PREFIX, self.year)
    }
}
