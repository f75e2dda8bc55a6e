//! Record composers: folding the parsed field set into the canonical record
//! and its transport-facing projections.
//!
//! [`JobFields`] is the single authored shape. [`InsertPayload`] is the
//! storage-write projection, [`StoredRecord`] extends it with storage
//! metadata, and [`UiRecord`] re-flattens wage and working hours into
//! display strings. Composers never re-derive a field; they only place,
//! decompose, or recombine values that already satisfy their invariants.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::parsed::{EmployeeCount, ExpiryDate, ReceivedDate, WageRange, WorkingHours};
use crate::raw::{
    CompanyName, EmploymentType, HomePage, JobNumber, Occupation, RawEmployeeCount, RawExpiryDate,
    RawJobPosting, RawReceivedDate, RawWage, RawWorkingHours,
};

/// Lifecycle status of a stored posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Expired,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(JobStatus::Active),
            "expired" => Ok(JobStatus::Expired),
            _ => Err(format!("Unknown job status: {s}")),
        }
    }
}

/// The canonical record: every field of one posting in parsed, semantically
/// valid form. All projections derive from this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFields {
    pub job_number: JobNumber,
    pub company_name: CompanyName,
    pub received_date: ReceivedDate,
    pub expiry_date: ExpiryDate,
    pub home_page: HomePage,
    pub occupation: Occupation,
    pub employment_type: EmploymentType,
    pub wage: WageRange,
    pub working_hours: WorkingHours,
    pub employee_count: EmployeeCount,
}

impl JobFields {
    /// Run the full two-stage pipeline over one scraped posting.
    ///
    /// The first failure is propagated as-is; no partially valid record is
    /// ever produced.
    pub fn from_raw(posting: &RawJobPosting) -> Result<Self, FieldError> {
        Self::compose(posting).inspect_err(|err| {
            tracing::warn!(
                job_number = %posting.job_number,
                error = %err,
                "rejecting scraped posting"
            );
        })
    }

    fn compose(posting: &RawJobPosting) -> Result<Self, FieldError> {
        let job_number = JobNumber::new(&posting.job_number)?;
        let company_name = CompanyName::new(&posting.company_name)?;
        let home_page = HomePage::new(posting.home_page.as_deref())?;
        let occupation = Occupation::new(&posting.occupation)?;
        let employment_type: EmploymentType = posting.employment_type.parse()?;

        let received_date = ReceivedDate::parse(&RawReceivedDate::new(&posting.received_date)?)?;
        let expiry_date = ExpiryDate::parse(&RawExpiryDate::new(&posting.expiry_date)?)?;
        let wage = WageRange::parse(&RawWage::new(&posting.wage)?)?;
        let working_hours =
            WorkingHours::parse(&RawWorkingHours::new(posting.working_hours.as_deref())?)?;
        let employee_count = EmployeeCount::parse(&RawEmployeeCount::new(&posting.employee_count))?;

        Ok(Self {
            job_number,
            company_name,
            received_date,
            expiry_date,
            home_page,
            occupation,
            employment_type,
            wage,
            working_hours,
            employee_count,
        })
    }
}

/// The shape accepted by the storage write path: parsed fields only, wage
/// and working hours decomposed into their wire sub-fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPayload {
    pub job_number: JobNumber,
    pub company_name: CompanyName,
    pub home_page: HomePage,
    pub occupation: Occupation,
    pub employment_type: EmploymentType,
    pub received_date: String,
    pub expiry_date: String,
    pub wage_min: u32,
    pub wage_max: u32,
    pub working_start_time: Option<String>,
    pub working_end_time: Option<String>,
    pub employee_count: u32,
}

impl InsertPayload {
    /// Structural projection from the canonical record. No parsing happens
    /// here; each field is placed or decomposed as-is.
    pub fn from_fields(fields: JobFields) -> Self {
        let (working_start_time, working_end_time) = match fields.working_hours.range() {
            Some((start, end)) => (Some(start.to_hhmmss()), Some(end.to_hhmmss())),
            None => (None, None),
        };

        Self {
            job_number: fields.job_number,
            company_name: fields.company_name,
            home_page: fields.home_page,
            occupation: fields.occupation,
            employment_type: fields.employment_type,
            received_date: fields.received_date.to_iso8601(),
            expiry_date: fields.expiry_date.to_iso8601(),
            wage_min: fields.wage.min(),
            wage_max: fields.wage.max(),
            working_start_time,
            working_end_time,
            employee_count: fields.employee_count.value(),
        }
    }
}

impl From<JobFields> for InsertPayload {
    fn from(fields: JobFields) -> Self {
        Self::from_fields(fields)
    }
}

/// The shape returned by storage reads: the insert payload extended with
/// storage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[serde(flatten)]
    pub job: InsertPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: JobStatus,
}

impl StoredRecord {
    pub fn new(
        job: InsertPayload,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        status: JobStatus,
    ) -> Self {
        Self {
            job,
            created_at,
            updated_at,
            status,
        }
    }

    pub fn job_number(&self) -> &str {
        self.job.job_number.as_str()
    }
}

/// The display projection: wage and working hours re-flattened into single
/// human-readable strings, numeric wage/time fields removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiRecord {
    pub job_number: JobNumber,
    pub company_name: CompanyName,
    pub home_page: HomePage,
    pub occupation: Occupation,
    pub employment_type: EmploymentType,
    pub received_date: String,
    pub expiry_date: String,
    pub wage: String,
    pub working_hours: String,
    pub employee_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: JobStatus,
}

impl UiRecord {
    /// Inverse flattening of a stored record.
    ///
    /// The wage string keeps comma grouping, making this the exact left
    /// inverse of the wage parser; working hours render as `H時MM分〜H時MM分`
    /// (hour unpadded, minute two digits) or the empty string when absent.
    ///
    /// A stored record comes from an external collaborator, so the implied
    /// invariants are re-checked here and surfaced as
    /// [`FieldError::InvariantViolation`] — never reordered or dropped.
    pub fn from_stored(stored: StoredRecord) -> Result<Self, FieldError> {
        let job = stored.job;

        if job.wage_min > job.wage_max {
            return Err(FieldError::InvariantViolation(format!(
                "stored wageMin {} exceeds wageMax {}",
                job.wage_min, job.wage_max
            )));
        }
        let wage = format!(
            "{}円〜{}円",
            group_thousands(job.wage_min),
            group_thousands(job.wage_max)
        );

        let working_hours = match (&job.working_start_time, &job.working_end_time) {
            (None, None) => String::new(),
            (Some(start), Some(end)) => {
                format!("{}〜{}", display_time(start)?, display_time(end)?)
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(FieldError::InvariantViolation(
                    "workingStartTime and workingEndTime must be present together".to_string(),
                ));
            }
        };

        Ok(Self {
            job_number: job.job_number,
            company_name: job.company_name,
            home_page: job.home_page,
            occupation: job.occupation,
            employment_type: job.employment_type,
            received_date: job.received_date,
            expiry_date: job.expiry_date,
            wage,
            working_hours,
            employee_count: job.employee_count,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            status: stored.status,
        })
    }
}

/// Re-group an integer with thousands separators (`200000` → `"200,000"`).
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a stored `HH:MM:00` bound as `H時MM分`.
fn display_time(value: &str) -> Result<String, FieldError> {
    let mut parts = value.split(':');
    let (Some(hour), Some(minute), Some("00"), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(FieldError::InvariantViolation(format!(
            "stored working time {value:?} is not in HH:MM:00 form"
        )));
    };

    let hour: u8 = hour.parse().map_err(|_| {
        FieldError::InvariantViolation(format!("stored working time {value:?} is not numeric"))
    })?;
    let minute: u8 = minute.parse().map_err(|_| {
        FieldError::InvariantViolation(format!("stored working time {value:?} is not numeric"))
    })?;

    Ok(format!("{hour}時{minute:02}分"))
}
