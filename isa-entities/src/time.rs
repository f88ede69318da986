use std::fmt;

use thiserror::Error;
use time::{macros::format_description, OffsetDateTime};

pub use time::Date;

/// A calendar date in ISO 8601 notation (`YYYY-MM-DD`),
/// i.e. the representation used for storage and exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

#[derive(Debug, Error)]
#[error("Invalid calendar date: {0}")]
pub struct CalendarDateParseError(String);

impl CalendarDate {
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(s: &str) -> Result<Self, CalendarDateParseError> {
        Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| CalendarDateParseError(s.to_owned()))
    }

    pub const fn as_date(self) -> Date {
        self.0
    }
}

impl From<Date> for CalendarDate {
    fn from(from: Date) -> Self {
        Self(from)
    }
}

impl From<CalendarDate> for Date {
    fn from(from: CalendarDate) -> Self {
        from.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(date) = self;
        write!(
            f,
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    }
}
