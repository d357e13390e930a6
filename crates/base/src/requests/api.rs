use crate::requests::entities::HttpRequestData;
use anyhow::Result;

pub trait SyncHttpRequest {
    /// Sends the request and returns the raw response body.
    /// Non-2xx responses are returned as an `HttpStatusError` inside the error.
    fn call(&self, req: HttpRequestData) -> Result<String>;
}
