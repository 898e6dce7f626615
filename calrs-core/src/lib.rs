//! Core data models for calendar event overlap detection.
//!
//! This crate holds the pieces every overlap engine in `calrs` shares: the [`Event`](models::Event)
//! record, the canonical [`Pair`](models::Pair) it produces, batch validation, and small
//! utilities for reading events from disk.
//!
//! ```rust
//! use calrs_core::models::{Event, Pair};
//!
//! let a = Event::new(0, 0, 100);
//! let b = Event::new(1, 100, 200);
//!
//! // shared endpoints count as overlap
//! assert!(a.overlaps(&b));
//! assert_eq!(Pair::new(b.id, a.id), Pair::new(0, 1));
//! ```
pub mod errors;
pub mod models;
pub mod utils;
