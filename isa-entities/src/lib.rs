#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # isa-entities
//!
//! Reusable, agnostic domain entities for ISA campaigns.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod campaign;
pub mod contribution;
pub mod id;
pub mod media;
pub mod revision;
pub mod time;
pub mod user;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
