pub mod dto;
pub mod pagination;

pub use dto::{
    FetchJobParams, FetchJobResponse, InsertJobRequest, InsertJobResponse, ListJobsResponse,
    NotFoundResponse,
};
pub use pagination::{ListJobsQuery, Pagination};
