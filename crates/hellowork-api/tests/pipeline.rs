//! End-to-end pipeline tests: scraped posting → canonical record → insert
//! payload → store → display record → transport envelopes.

use hellowork_api::dto::{FetchJobResponse, InsertJobResponse, NotFoundResponse};
use hellowork_api::pagination::{ListJobsQuery, Pagination};
use hellowork_core::error::FieldError;
use hellowork_core::raw::RawJobPosting;
use hellowork_core::record::{InsertPayload, JobFields, UiRecord};
use hellowork_core::store::{JobStore, MemoryStore};

fn scraped_posting(job_number: &str, wage: &str) -> RawJobPosting {
    serde_json::from_value(serde_json::json!({
        "jobNumber": job_number,
        "companyName": "株式会社サンプル",
        "receivedDate": "2024年3月5日",
        "expiryDate": "2024年4月5日",
        "homePage": "https://example.co.jp",
        "occupation": "ソフトウェア開発技術者",
        "employmentType": "正社員",
        "wage": wage,
        "workingHours": "9時00分〜18時00分",
        "employeeCount": "従業員10名"
    }))
    .unwrap()
}

#[test]
fn scraped_posting_becomes_the_expected_insert_payload() {
    let posting = scraped_posting("12345-6789", "200,000円〜300,000円");
    let payload = InsertPayload::from_fields(JobFields::from_raw(&posting).unwrap());

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["jobNumber"], "12345-6789");
    assert_eq!(json["receivedDate"], "2024-03-05T00:00:00.000Z");
    assert_eq!(json["expiryDate"], "2024-04-05T00:00:00.000Z");
    assert_eq!(json["wageMin"], 200_000);
    assert_eq!(json["wageMax"], 300_000);
    assert_eq!(json["workingStartTime"], "09:00:00");
    assert_eq!(json["workingEndTime"], "18:00:00");
    assert_eq!(json["employeeCount"], 10);
}

#[test]
fn malformed_wage_rejects_the_record_before_any_payload_exists() {
    let posting = scraped_posting("12345-6789", "abc");
    let err = JobFields::from_raw(&posting).unwrap_err();
    assert_eq!(err, FieldError::WageFormat { raw: "abc".into() });
}

#[test]
fn insert_then_fetch_then_render() {
    let store = MemoryStore::new();
    let posting = scraped_posting("12345-6789", "200,000円〜300,000円");
    let payload = InsertPayload::from_fields(JobFields::from_raw(&posting).unwrap());

    let stored = store.insert(payload).unwrap();
    let envelope = serde_json::to_value(InsertJobResponse::ok(stored)).unwrap();
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["result"]["job"]["jobNumber"], "12345-6789");

    let fetched = store.fetch("12345-6789").unwrap().unwrap();
    let ui = UiRecord::from_stored(fetched).unwrap();
    let response = serde_json::to_value(FetchJobResponse { job: ui }).unwrap();
    assert_eq!(response["job"]["wage"], "200,000円〜300,000円");
    assert_eq!(response["job"]["workingHours"], "9時00分〜18時00分");
    assert_eq!(response["job"]["status"], "active");
}

#[test]
fn list_returns_ordered_paginated_display_records() {
    let store = MemoryStore::new();
    for n in 1..=3 {
        let posting = scraped_posting(&format!("12345-{n}"), "200,000円〜300,000円");
        let payload = InsertPayload::from_fields(JobFields::from_raw(&posting).unwrap());
        store.insert(payload).unwrap();
    }

    let query = ListJobsQuery {
        page: Some("1".to_string()),
        limit: Some("2".to_string()),
    };
    let pagination = Pagination::from_query(&query).unwrap();

    let page: Vec<UiRecord> = store
        .list(pagination.page, pagination.limit)
        .unwrap()
        .into_iter()
        .map(|stored| UiRecord::from_stored(stored).unwrap())
        .collect();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].job_number.as_str(), "12345-1");
    assert_eq!(page[1].job_number.as_str(), "12345-2");
}

#[test]
fn empty_page_maps_to_a_message_envelope() {
    let store = MemoryStore::new();
    let pagination = Pagination::from_query(&ListJobsQuery::default()).unwrap();
    let records = store.list(pagination.page, pagination.limit).unwrap();
    assert!(records.is_empty());

    let body = NotFoundResponse {
        message: "no jobs found".to_string(),
    };
    assert_eq!(serde_json::to_value(body).unwrap()["message"], "no jobs found");
}
