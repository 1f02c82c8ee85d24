use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] polars::prelude::PolarsError),

    #[error("core error: {0}")]
    Core(#[from] mna_core::error::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
