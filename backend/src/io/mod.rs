//! # IO Module
//!
//! Interface layer between the rendering layer and the domain logic: REST
//! endpoints, DTO mapping and error translation.

pub mod rest;
