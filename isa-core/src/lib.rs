pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;

pub mod entities {
    pub use isa_entities::{
        campaign::*, contribution::*, id::*, media::*, revision::*, time::*, user::*,
    };
}
