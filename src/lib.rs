//! Appointment Booking Engine
//!
//! This crate provides the scheduling core of a multi-tenant appointment
//! booking platform: bookable slot generation, employee assignment for
//! "any employee" bookings, opening-hours validation and the check for
//! bookings affected by an hours change. An axum API and an in-memory
//! repository wrap the core for serving.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
