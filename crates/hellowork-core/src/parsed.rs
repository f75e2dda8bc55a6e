//! Field parsers: semantic conversion of accepted raw strings.
//!
//! Each parser consumes exactly one raw type from [`crate::raw`] and
//! produces the canonical value for its kind, failing with a specific
//! [`FieldError`] on malformed content. All parsers are pure and
//! deterministic: same raw string, same result, always.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::FieldError;
use crate::raw::{RawEmployeeCount, RawExpiryDate, RawReceivedDate, RawWage, RawWorkingHours};

// レンジ: "200,000円〜300,000円" (thousands separators required per group)
static WAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}(?:,\d{3})*)円〜(\d{1,3}(?:,\d{3})*)円$").unwrap());
// 時間帯: "9時00分〜18時00分"
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})時(\d{1,2})分〜(\d{1,2})時(\d{1,2})分$").unwrap());
// 従業員数テキスト中の最初の数字列
static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Convert an era-style date (`yyyy年mm月dd日`) to a calendar date.
///
/// The separators are rewritten to build an ISO-like intermediate, then
/// chrono validates the calendar (nonexistent days are rejected).
fn parse_era_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let iso_like = raw.replace('年', "-").replace('月', "-").replace('日', "");
    NaiveDate::parse_from_str(&iso_like, "%Y-%m-%d").map_err(|_| FieldError::DateFormat {
        raw: raw.to_string(),
    })
}

/// Serialize a calendar date as the canonical wire instant: UTC midnight
/// with millisecond precision, e.g. `2024-03-05T00:00:00.000Z`.
fn to_iso_instant(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Date the posting was received by the employment office.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedDate(NaiveDate);

impl ReceivedDate {
    pub fn parse(raw: &RawReceivedDate) -> Result<Self, FieldError> {
        parse_era_date(raw.as_str()).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn to_iso8601(&self) -> String {
        to_iso_instant(self.0)
    }
}

/// Date the posting expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate(NaiveDate);

impl ExpiryDate {
    pub fn parse(raw: &RawExpiryDate) -> Result<Self, FieldError> {
        parse_era_date(raw.as_str()).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn to_iso8601(&self) -> String {
        to_iso_instant(self.0)
    }
}

/// Monthly wage range in yen, lower bound never above the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WageRange {
    min: u32,
    max: u32,
}

impl WageRange {
    /// Parse a comma-grouped yen range like `200,000円〜300,000円`.
    ///
    /// An inverted range is a data-quality defect and is surfaced as
    /// [`FieldError::InvariantViolation`], never reordered silently.
    pub fn parse(raw: &RawWage) -> Result<Self, FieldError> {
        let caps = WAGE_RE
            .captures(raw.as_str())
            .ok_or_else(|| FieldError::WageFormat {
                raw: raw.as_str().to_string(),
            })?;

        let min = parse_grouped_yen(&caps[1], raw.as_str())?;
        let max = parse_grouped_yen(&caps[2], raw.as_str())?;

        if min > max {
            return Err(FieldError::InvariantViolation(format!(
                "wageMin {min} exceeds wageMax {max}"
            )));
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

fn parse_grouped_yen(group: &str, raw: &str) -> Result<u32, FieldError> {
    group
        .replace(',', "")
        .parse::<u32>()
        .map_err(|_| FieldError::WageFormat {
            raw: raw.to_string(),
        })
}

/// One bound of a working-hours range, canonical form `HH:MM:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingTime {
    hour: u8,
    minute: u8,
}

impl WorkingTime {
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Canonical storage form, zero-padded with a fixed `:00` seconds field.
    pub fn to_hhmmss(&self) -> String {
        format!("{:02}:{:02}:00", self.hour, self.minute)
    }

    /// Canonical display form: hour unpadded, minute two digits (`9時00分`).
    pub fn to_display(&self) -> String {
        format!("{}時{:02}分", self.hour, self.minute)
    }
}

impl fmt::Display for WorkingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hour, self.minute)
    }
}

/// Parsed working hours. Absence of the raw field is a valid outcome, and
/// pair presence is structural: a start without an end (or vice versa) is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingHours {
    Absent,
    Range { start: WorkingTime, end: WorkingTime },
}

impl WorkingHours {
    /// Parse a present value like `9時00分〜18時00分`, or map an absent raw
    /// field to [`WorkingHours::Absent`] without error.
    ///
    /// Hours above 23 and minutes above 59 fail the grammar: the shape regex
    /// is lexical, but the field denotes clock times.
    pub fn parse(raw: &RawWorkingHours) -> Result<Self, FieldError> {
        let Some(value) = raw.value() else {
            return Ok(WorkingHours::Absent);
        };

        let caps = HOURS_RE
            .captures(value)
            .ok_or_else(|| FieldError::WorkingHoursFormat {
                raw: value.to_string(),
            })?;

        let start = clock_time(&caps[1], &caps[2], value)?;
        let end = clock_time(&caps[3], &caps[4], value)?;

        Ok(WorkingHours::Range { start, end })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, WorkingHours::Absent)
    }

    pub fn range(&self) -> Option<(WorkingTime, WorkingTime)> {
        match self {
            WorkingHours::Absent => None,
            WorkingHours::Range { start, end } => Some((*start, *end)),
        }
    }
}

fn clock_time(hour: &str, minute: &str, raw: &str) -> Result<WorkingTime, FieldError> {
    // Capture groups are 1-2 digit runs, so u8 parsing cannot fail.
    let hour: u8 = hour.parse().unwrap_or(u8::MAX);
    let minute: u8 = minute.parse().unwrap_or(u8::MAX);
    if hour > 23 || minute > 59 {
        return Err(FieldError::WorkingHoursFormat {
            raw: raw.to_string(),
        });
    }
    Ok(WorkingTime { hour, minute })
}

/// Employee count extracted from free text (`従業員10名` → 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeCount(u32);

impl EmployeeCount {
    /// Take the first contiguous digit run in the text as the count.
    ///
    /// Text with no digit run at all fails with
    /// [`FieldError::NoNumericValue`]. The extraction can only yield digit
    /// characters, so the remaining guard is the integer-range check.
    pub fn parse(raw: &RawEmployeeCount) -> Result<Self, FieldError> {
        let run = DIGIT_RUN_RE
            .find(raw.as_str())
            .ok_or_else(|| FieldError::NoNumericValue {
                raw: raw.as_str().to_string(),
            })?;

        let count = run.as_str().parse::<u32>().map_err(|_| {
            FieldError::InvariantViolation(format!(
                "employeeCount {} exceeds the supported range",
                run.as_str()
            ))
        })?;

        Ok(Self(count))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}
