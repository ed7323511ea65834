pub mod logging;

pub use logging::{with_request_tracing, REQUEST_ID_HEADER};
