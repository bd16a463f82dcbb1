//! Application core: alarm rules and their data, zero I/O.
//!
//! This module contains the business rules for the CatPoint system: the
//! sensor model, the security service and the events it emits.  All
//! interaction with storage, image classification and listeners happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable with in-memory fakes.

pub mod commands;
pub mod events;
pub mod model;
pub mod ports;
pub mod service;
