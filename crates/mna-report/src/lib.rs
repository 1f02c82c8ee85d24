//! Waveform and pole-zero result export: a primary plain-text TR0-style
//! table, an optional Parquet side file, and a text renderer for `.pz`
//! results.

pub mod error;
pub mod parquet;
pub mod pole_zero_text;
pub mod tr0;

pub use error::Result;
pub use tr0::TrFormat;
