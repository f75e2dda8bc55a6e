use serde::{Deserialize, Serialize};

use hellowork_core::error::FieldError;
use hellowork_core::raw::{CompanyName, EmploymentType, HomePage, JobNumber, Occupation};
use hellowork_core::record::{InsertPayload, StoredRecord, UiRecord};

// ---------------------------------------------------------------------------
// Insert
// ---------------------------------------------------------------------------

/// Wire twin of [`InsertPayload`]: the body accepted by the insert
/// operation. Crossing the transport boundary strips the type brands, so the
/// body is re-validated field by field before it becomes a payload again.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertJobRequest {
    pub job_number: String,
    pub company_name: String,
    pub home_page: Option<String>,
    pub occupation: String,
    pub employment_type: String,
    pub received_date: String,
    pub expiry_date: String,
    pub wage_min: u32,
    pub wage_max: u32,
    #[serde(default)]
    pub working_start_time: Option<String>,
    #[serde(default)]
    pub working_end_time: Option<String>,
    pub employee_count: u32,
}

impl InsertJobRequest {
    /// Re-validate the body and rebuild the branded insert payload.
    ///
    /// The first failing field rejects the whole request; there is no
    /// partial acceptance.
    pub fn into_payload(self) -> Result<InsertPayload, FieldError> {
        let job_number = JobNumber::new(&self.job_number)?;
        let company_name = CompanyName::new(&self.company_name)?;
        let home_page = HomePage::new(self.home_page.as_deref())?;
        let occupation = Occupation::new(&self.occupation)?;
        let employment_type: EmploymentType = self.employment_type.parse()?;

        let received_date = validate_iso_instant("receivedDate", self.received_date)?;
        let expiry_date = validate_iso_instant("expiryDate", self.expiry_date)?;

        if self.wage_min > self.wage_max {
            return Err(FieldError::InvariantViolation(format!(
                "wageMin {} exceeds wageMax {}",
                self.wage_min, self.wage_max
            )));
        }

        match (&self.working_start_time, &self.working_end_time) {
            (None, None) | (Some(_), Some(_)) => {}
            _ => {
                return Err(FieldError::InvariantViolation(
                    "workingStartTime and workingEndTime must be present together".to_string(),
                ));
            }
        }

        Ok(InsertPayload {
            job_number,
            company_name,
            home_page,
            occupation,
            employment_type,
            received_date,
            expiry_date,
            wage_min: self.wage_min,
            wage_max: self.wage_max,
            working_start_time: self.working_start_time,
            working_end_time: self.working_end_time,
            employee_count: self.employee_count,
        })
    }
}

fn validate_iso_instant(field: &'static str, value: String) -> Result<String, FieldError> {
    match chrono::DateTime::parse_from_rfc3339(&value) {
        Ok(_) => Ok(value),
        Err(_) => Err(FieldError::Shape {
            field,
            expected: "an ISO-8601 date-time",
        }),
    }
}

#[derive(Debug, Serialize)]
pub struct InsertJobResponse {
    pub success: bool,
    pub result: InsertJobResult,
}

#[derive(Debug, Serialize)]
pub struct InsertJobResult {
    pub job: StoredRecord,
}

impl InsertJobResponse {
    pub fn ok(job: StoredRecord) -> Self {
        Self {
            success: true,
            result: InsertJobResult { job },
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchJobParams {
    pub job_number: String,
}

#[derive(Debug, Serialize)]
pub struct FetchJobResponse {
    pub job: UiRecord,
}

/// Body of a not-found (or empty-list) response.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Ordered sequence of display records; the list operation returns the page
/// as a bare array.
pub type ListJobsResponse = Vec<UiRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use hellowork_core::record::JobStatus;
    use hellowork_core::store::{JobStore, MemoryStore, StoreError};

    fn sample_request() -> InsertJobRequest {
        serde_json::from_value(serde_json::json!({
            "jobNumber": "12345-6789",
            "companyName": "株式会社サンプル",
            "homePage": "https://example.co.jp",
            "occupation": "ソフトウェア開発技術者",
            "employmentType": "正社員",
            "receivedDate": "2024-03-05T00:00:00.000Z",
            "expiryDate": "2024-04-05T00:00:00.000Z",
            "wageMin": 200000,
            "wageMax": 300000,
            "workingStartTime": "09:00:00",
            "workingEndTime": "18:00:00",
            "employeeCount": 10
        }))
        .unwrap()
    }

    #[test]
    fn valid_body_rebuilds_the_payload() {
        let payload = sample_request().into_payload().unwrap();
        assert_eq!(payload.job_number.as_str(), "12345-6789");
        assert_eq!(payload.received_date, "2024-03-05T00:00:00.000Z");
        assert_eq!(payload.wage_min, 200_000);
    }

    #[test]
    fn malformed_job_number_rejected_at_the_boundary() {
        let mut req = sample_request();
        req.job_number = "123-456".to_string();
        assert!(req.into_payload().unwrap_err().is_shape_error());
    }

    #[test]
    fn non_iso_dates_rejected() {
        let mut req = sample_request();
        req.received_date = "2024年3月5日".to_string();
        let err = req.into_payload().unwrap_err();
        assert_eq!(
            err,
            FieldError::Shape {
                field: "receivedDate",
                expected: "an ISO-8601 date-time"
            }
        );
    }

    #[test]
    fn inverted_wage_rejected() {
        let mut req = sample_request();
        req.wage_min = 400_000;
        assert!(matches!(
            req.into_payload().unwrap_err(),
            FieldError::InvariantViolation(_)
        ));
    }

    #[test]
    fn one_sided_working_times_rejected() {
        let mut req = sample_request();
        req.working_end_time = None;
        assert!(matches!(
            req.into_payload().unwrap_err(),
            FieldError::InvariantViolation(_)
        ));

        let mut req = sample_request();
        req.working_start_time = None;
        req.working_end_time = None;
        assert!(req.into_payload().is_ok());
    }

    #[test]
    fn insert_fetch_round_trip_through_the_envelopes() {
        let store = MemoryStore::new();
        let stored = store.insert(sample_request().into_payload().unwrap()).unwrap();

        let response = InsertJobResponse::ok(stored);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["result"]["job"]["jobNumber"], "12345-6789");
        assert_eq!(json["result"]["job"]["status"], "active");

        let fetched = store.fetch("12345-6789").unwrap().unwrap();
        assert_eq!(fetched.status, JobStatus::Active);
        let ui = UiRecord::from_stored(fetched).unwrap();
        let json = serde_json::to_value(&FetchJobResponse { job: ui }).unwrap();
        assert_eq!(json["job"]["wage"], "200,000円〜300,000円");
        assert_eq!(json["job"]["workingHours"], "9時00分〜18時00分");
    }

    #[test]
    fn duplicate_insert_surfaces_store_error() {
        let store = MemoryStore::new();
        store.insert(sample_request().into_payload().unwrap()).unwrap();

        let err = store
            .insert(sample_request().into_payload().unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Duplicate {
                job_number: "12345-6789".into()
            }
        );
    }

    #[test]
    fn not_found_envelope_shape() {
        let json = serde_json::to_value(NotFoundResponse {
            message: "job not found: 99999-9".to_string(),
        })
        .unwrap();
        assert_eq!(json["message"], "job not found: 99999-9");
    }
}
