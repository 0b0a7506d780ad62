//! HTTP surface of the mock server.
//!
//! ## Endpoints
//!
//! - `GET /status` - version probe
//! - `POST /configure_mock`, `POST /configure_mock/binary` - register a mock
//! - `GET /storage`, `POST /cleanup_storage` - inspect or prune the registry
//! - `GET /mock_params`, `POST /cleanup_params` - captured requests
//! - anything else - mock dispatch

mod handlers;
mod router;
mod server;
mod types;

pub use router::{route, route_request};
pub use server::MockServer;
pub use types::{path_param, ApiResponse, ValidationErrorResponse};
