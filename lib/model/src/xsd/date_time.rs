use crate::vocab::xsd;
use crate::InvalidLiteralError;
use oxsdatatypes::{DateTime, Decimal, Integer, TimezoneOffset};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// [XML Schema `dateTime` datatype](https://www.w3.org/TR/xmlschema11-2/#dateTime) normalized to
/// UTC with millisecond precision.
///
/// Uses internally the number of milliseconds since `1970-01-01T00:00:00Z` as [`i64`]. The
/// supported range spans the years 1 to 9999.
///
/// # Lexical Form
///
/// Any `xsd:dateTime` lexical form whose value lies within the supported years. A missing timezone is
/// read as UTC. Fractional digits beyond milliseconds are only accepted if they are zero, as they
/// could not be restored. The canonical form always uses `Z` and only includes a fraction if the
/// millisecond part is non-zero.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Timestamp {
    millis: i64,
}

/// Returned if a number of milliseconds lies outside the supported years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("The timestamp {0}ms lies outside the years 1 to 9999.")]
pub struct TimestampOutOfRangeError(pub i64);

impl Timestamp {
    /// `0001-01-01T00:00:00Z`
    pub const MIN: Self = Self {
        millis: -62_135_596_800_000,
    };
    /// `9999-12-31T23:59:59.999Z`
    pub const MAX: Self = Self {
        millis: 253_402_300_799_999,
    };
    /// `1970-01-01T00:00:00Z`
    pub const UNIX_EPOCH: Self = Self { millis: 0 };

    /// Creates a new [Timestamp] from the milliseconds since the Unix epoch.
    pub fn try_from_millis(millis: i64) -> Result<Self, TimestampOutOfRangeError> {
        if (Self::MIN.millis..=Self::MAX.millis).contains(&millis) {
            Ok(Self { millis })
        } else {
            Err(TimestampOutOfRangeError(millis))
        }
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.millis
    }
}

impl TryFrom<i64> for Timestamp {
    type Error = TimestampOutOfRangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from_millis(value)
    }
}

impl From<Timestamp> for i64 {
    fn from(value: Timestamp) -> Self {
        value.millis
    }
}

impl FromStr for Timestamp {
    type Err = InvalidLiteralError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| InvalidLiteralError::new(xsd::DATE_TIME, input, reason);

        let date_time = DateTime::from_str(input)
            .map_err(|error| invalid(&error.to_string()))?
            .adjust(Some(TimezoneOffset::UTC))
            .ok_or_else(|| invalid("cannot be normalized to UTC"))?;

        let year = date_time.year();
        if !(1..=9999).contains(&year) {
            return Err(invalid("outside the years 1 to 9999"));
        }

        let second_millis = date_time
            .second()
            .checked_mul(Decimal::from(MILLIS_PER_SECOND))
            .ok_or_else(|| invalid("invalid seconds"))?;
        let whole_millis =
            Integer::try_from(second_millis).map_err(|_| invalid("invalid seconds"))?;
        if Decimal::from(whole_millis) != second_millis {
            return Err(invalid("precision beyond milliseconds"));
        }

        let days = days_from_civil(
            year,
            u32::from(date_time.month()),
            u32::from(date_time.day()),
        );
        let millis = days * MILLIS_PER_DAY
            + i64::from(date_time.hour()) * MILLIS_PER_HOUR
            + i64::from(date_time.minute()) * MILLIS_PER_MINUTE
            + i64::from(whole_millis);
        Self::try_from_millis(millis).map_err(|_| invalid("outside the years 1 to 9999"))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.millis.div_euclid(MILLIS_PER_DAY);
        let millis_of_day = self.millis.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        let hour = millis_of_day / MILLIS_PER_HOUR;
        let minute = millis_of_day / MILLIS_PER_MINUTE % 60;
        let second = millis_of_day / MILLIS_PER_SECOND % 60;
        let millis = millis_of_day % MILLIS_PER_SECOND;

        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
        )?;
        if millis != 0 {
            write!(f, ".{millis:03}")?;
        }
        f.write_str("Z")
    }
}

/// Days since the Unix epoch of the given proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = year - era * 400;
    let shifted_month = i64::from((month + 9) % 12);
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Inverse of [days_from_civil].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719_468;
    let era = (if days >= 0 { days } else { days - 146_096 }) / 146_097;
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u32;
    let month = (if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    }) as u32;
    let year = year_of_era + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}
