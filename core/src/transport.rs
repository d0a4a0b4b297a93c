//! The seam between the core and whatever executes HTTP for the host.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Non-2xx responses are returned as data, not errors; status interpretation
/// belongs to `FoodClient`. Only failures where no response exists map to
/// `ApiError::Transport`.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
