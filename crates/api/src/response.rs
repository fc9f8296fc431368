//! Response envelopes shared by the handlers.
//!
//! Every success body is an object with the payload under `data`, so
//! clients can unwrap responses uniformly.

use serde::Serialize;

/// `{ "data": T }`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "limit": n, "offset": n }` for paginated listings. The
/// echoed limit and offset are the clamped values actually applied.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub limit: i64,
    pub offset: i64,
}
