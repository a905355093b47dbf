//! Core data models for the booking engine.
//!
//! This module contains the plain data the scheduling core consumes:
//! hours, employees, services, bookings and the business snapshot that
//! aggregates them.

mod booking;
mod business;
mod employee;
mod hours;
mod service;

pub use booking::{Booking, BookingStatus};
pub use business::Business;
pub use employee::Employee;
pub use hours::{DayHours, DayOfWeek, Hours, Interval};
pub use service::{Service, total_duration};
