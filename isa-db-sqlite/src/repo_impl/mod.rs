use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    sql_types::BigInt,
};

use isa_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod campaign;
mod contribution;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

define_sql_function! {
    /// The rowid of the most recent successful insert
    /// on the same connection.
    fn last_insert_rowid() -> BigInt;
}

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn read_only_violation() -> repo::Error {
    repo::Error::Other(anyhow!("Write access with a read-only connection"))
}

fn load_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64> {
    diesel::select(last_insert_rowid())
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)
}

fn parse_date(date: &str) -> Result<CalendarDate> {
    CalendarDate::parse(date).map_err(|err| repo::Error::Other(err.into()))
}

fn count_to_usize(count: i64) -> usize {
    usize::try_from(count).unwrap_or_default()
}
