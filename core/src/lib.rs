//! Client core for the food dashboard.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the dashboard's
//! cached view of the `/foods` collection in a `DashboardState` that only
//! changes through explicit transitions.
//!
//! # Design
//! - `FoodClient` is stateless, it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `DashboardState::apply` is a pure `state + event -> state` function.
//!   `Dashboard` pairs it with a `Transport` supplied by the host.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::FoodClient;
pub use dashboard::{Dashboard, DashboardEvent, DashboardState};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{CreateFood, Food, FoodId, FoodPatch, NewFood};
