//! Stratified hour-of-day sampling of AudioMoth recording catalogues.
//!
//! [`pipeline::run`] loads a catalogue, drops recordings failing the quality
//! filter, keeps only devices covering all 24 hours of the day and draws one
//! recording per device and hour.

pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use config::{FilterCriteria, RunConfig};
pub use data::model::{Catalogue, Recording};
pub use error::{FailureKind, LoadError, PipelineError, WriteError};
pub use pipeline::{run, select, stratified_sample, RunSummary, RunWarning, Selection};
