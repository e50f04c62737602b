//! mocksim Core Library
//!
//! Shared types for the Dynamic API Simulator.
//!
//! # Modules
//!
//! - [`value`] - Tagged parameter values and generation policies
//! - [`resolve`] - The pure mock-response resolution engine
//! - [`pattern`] - Failure-pattern synthesis and time-series analytics

pub mod pattern;
pub mod resolve;
pub mod value;

// Re-export main types for convenient access
pub use value::{
    FailureParameters, ParamValue, ParameterConfig, ParameterConfigMap, Parameters, ValueType,
};
