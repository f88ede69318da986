#[macro_use]
extern crate log;

mod export_stats;
mod submit_edit;

pub mod prelude {
    pub use super::{export_stats::*, submit_edit::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use isa_core::{entities::*, gateways::wiki::WikiEditGateway, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use isa_db_sqlite::Connections;
}
