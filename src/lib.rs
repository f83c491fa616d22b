//! Festlang - Festival Metadata Translation
//!
//! Batch job that translates festival names and descriptions from a CSV
//! export into English, Spanish and French, writing one row per festival
//! and language.

pub mod batch;
pub mod cli;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod language;
pub mod record;
pub mod translate;
