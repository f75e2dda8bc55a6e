//! Raw field validators: structural acceptance of scraped strings.
//!
//! Each kind gets its own newtype so an accepted value cannot be confused
//! with a value of another kind or with an unvalidated string. Construction
//! goes through the validating constructor only; none of these perform any
//! semantic conversion — that is the parsers' job.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FieldError;

static JOB_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-\d{0,8}$").unwrap());
static ERA_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}年\d{1,2}月\d{1,2}日$").unwrap());

/// Hello Work job number: five digits, a hyphen, then up to eight digits.
///
/// Identity-parsed kind: the accepted value is already canonical, so this
/// type flows through to the record projections unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JobNumber(String);

impl JobNumber {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if JOB_NUMBER_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(FieldError::Shape {
                field: "jobNumber",
                expected: "NNNNN-NNNNNNNN (five digits, hyphen, up to eight digits)",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Company name: brand only, no constraint beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Shape {
                field: "companyName",
                expected: "a non-empty string",
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Occupation label as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Occupation(String);

impl Occupation {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Shape {
                field: "occupation",
                expected: "a non-empty string",
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The fixed employment-type vocabulary used by the site.
///
/// Wire form is the site's Japanese label on both serialize and deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "正社員")]
    FullTimeEmployee,
    #[serde(rename = "パート労働者")]
    PartTimeWorker,
    #[serde(rename = "正社員以外")]
    NonFullTimeEmployee,
    #[serde(rename = "有期雇用派遣労働者")]
    FixedTermDispatchWorker,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTimeEmployee => "正社員",
            EmploymentType::PartTimeWorker => "パート労働者",
            EmploymentType::NonFullTimeEmployee => "正社員以外",
            EmploymentType::FixedTermDispatchWorker => "有期雇用派遣労働者",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "正社員" => Ok(EmploymentType::FullTimeEmployee),
            "パート労働者" => Ok(EmploymentType::PartTimeWorker),
            "正社員以外" => Ok(EmploymentType::NonFullTimeEmployee),
            "有期雇用派遣労働者" => Ok(EmploymentType::FixedTermDispatchWorker),
            _ => Err(FieldError::Shape {
                field: "employmentType",
                expected: "one of 正社員 / パート労働者 / 正社員以外 / 有期雇用派遣労働者",
            }),
        }
    }
}

/// Company home page: an absolute URL, or explicitly absent. Never required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HomePage(Option<Url>);

impl HomePage {
    pub fn new(raw: Option<&str>) -> Result<Self, FieldError> {
        match raw {
            None => Ok(Self(None)),
            Some(s) => {
                let url = Url::parse(s).map_err(|_| FieldError::Shape {
                    field: "homePage",
                    expected: "an absolute URL",
                })?;
                Ok(Self(Some(url)))
            }
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.0.as_ref()
    }
}

/// Era-style received date, shape-checked only (`yyyy年mm月dd日`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReceivedDate(String);

impl RawReceivedDate {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if ERA_DATE_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(FieldError::Shape {
                field: "receivedDate",
                expected: "yyyy年mm月dd日",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Era-style expiry date, shape-checked only (`yyyy年mm月dd日`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpiryDate(String);

impl RawExpiryDate {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if ERA_DATE_RE.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(FieldError::Shape {
                field: "expiryDate",
                expected: "yyyy年mm月dd日",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wage text, accepted non-empty. The real grammar is semantic and lives in
/// the wage parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWage(String);

impl RawWage {
    pub fn new(raw: &str) -> Result<Self, FieldError> {
        if raw.is_empty() {
            return Err(FieldError::Shape {
                field: "wage",
                expected: "a non-empty string",
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Working-hours text. The whole field is optional; a present value must be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWorkingHours(Option<String>);

impl RawWorkingHours {
    pub fn new(raw: Option<&str>) -> Result<Self, FieldError> {
        match raw {
            None => Ok(Self(None)),
            Some("") => Err(FieldError::Shape {
                field: "workingHours",
                expected: "a non-empty string when present",
            }),
            Some(s) => Ok(Self(Some(s.to_string()))),
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Employee-count text. Any string is accepted here; digit extraction is
/// deferred to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmployeeCount(String);

impl RawEmployeeCount {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One job posting as delivered by the scraping collaborator: ten raw
/// strings, keyed as on the wire. This is the input boundary of the
/// pipeline; nothing in it carries any guarantee yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobPosting {
    pub job_number: String,
    pub company_name: String,
    pub received_date: String,
    pub expiry_date: String,
    pub home_page: Option<String>,
    pub occupation: String,
    pub employment_type: String,
    pub wage: String,
    #[serde(default)]
    pub working_hours: Option<String>,
    pub employee_count: String,
}
