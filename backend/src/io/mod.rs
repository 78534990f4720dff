//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services: routing,
//! JSON (de)serialization and translation of domain errors into status
//! codes. No business rules live here.

pub mod rest;
