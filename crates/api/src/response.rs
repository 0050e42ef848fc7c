use serde::Serialize;

/// `{ "data": ... }` envelope used by every entity endpoint. The dashboard
/// and the assistant reply are flat and do not use it.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
