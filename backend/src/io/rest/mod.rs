//! # REST API Interface Layer
//!
//! HTTP endpoints consumed by the calendar rendering layer. Handlers map the
//! `shared` DTOs to domain types, call the calendar service and translate
//! domain errors into status codes. No business logic lives here.

pub mod calendar_apis;
pub mod logging_apis;
pub mod mappers;
