//! Implementations of the gateways that are required
//! to talk to the outside world.

pub mod mediawiki;
pub mod oauth1;
