pub mod batch;
pub mod http;

pub use batch::{BatchSummary, value_csv};
pub use http::create_router;
