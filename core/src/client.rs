//! Stateless HTTP request builder and response parser for the food API.
//!
//! # Design
//! `FoodClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateFood, Food, FoodId};

/// Synchronous, stateless client for the `/foods` resource.
#[derive(Debug, Clone)]
pub struct FoodClient {
    base_url: String,
}

impl FoodClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_foods(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/foods", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_food(&self, input: &CreateFood) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/foods", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    /// `food` is the complete merged record; its own `id` is not consulted.
    pub fn build_update_food(&self, id: FoodId, food: &Food) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/foods/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_json(food)?),
        })
    }

    pub fn build_delete_food(&self, id: FoodId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/foods/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_foods(&self, response: HttpResponse) -> Result<Vec<Food>, ApiError> {
        check_status(&response, &[200])?;
        from_json(&response.body)
    }

    /// json-server answers 201, some backends answer 200.
    pub fn parse_create_food(&self, response: HttpResponse) -> Result<Food, ApiError> {
        check_status(&response, &[200, 201])?;
        from_json(&response.body)
    }

    pub fn parse_update_food(&self, response: HttpResponse) -> Result<Food, ApiError> {
        check_status(&response, &[200])?;
        from_json(&response.body)
    }

    /// The response body is ignored.
    pub fn parse_delete_food(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.is_success() {
            return Ok(());
        }
        check_status(&response, &[])
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-accepted status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
