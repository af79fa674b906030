//! HTTP API Handlers and Routes
//!
//! This module provides the REST facade over the agent registry, built on the
//! Axum web framework. It adds no semantics of its own: each handler decodes
//! a request body, calls one registry operation, and serializes the result.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Service
//! - `GET /` - Service info
//! - `GET /health` - Health check with live agent count
//!
//! ## Agents (`/agent`)
//! - `POST /agent/create` - Create a named agent
//! - `GET /agent/list` - List agent names
//! - `GET /agent/{name}` - Agent info
//! - `DELETE /agent/{name}` - Delete an agent
//!
//! ## Modes
//! - `POST /agent/{name}/ask` - Direct answer
//! - `POST /agent/{name}/study` - Analysis with optional context
//! - `POST /agent/{name}/plan` - Plan with optional goals
//!
//! Mode endpoints create the agent on first use.
//!
//! ## History
//! - `GET /agent/{name}/history` - Past calls in order
//! - `DELETE /agent/{name}/history` - Clear history
//!
//! # Errors
//!
//! Failures are returned as `{"error": "<message>"}` with the status code
//! chosen by [`AppError`](crate::types::AppError).

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

pub use routes::create_router;
