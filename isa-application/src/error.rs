use isa_core::{gateways::wiki, repositories::Error as RepoError, usecases::Error as BError};
use std::io;
use thiserror::Error;

pub use isa_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<wiki::Error> for AppError {
    fn from(err: wiki::Error) -> AppError {
        AppError::Business(BError::Wiki(err))
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// The wiki error if the wiki rejected a request.
    pub fn wiki_error(&self) -> Option<&wiki::Error> {
        match self {
            Self::Business(BError::Wiki(err)) => Some(err),
            _ => None,
        }
    }
}
