//! The external analysis engine boundary.
//!
//! The engine owns the persisted lookup table (PLT) format and the analysis
//! itself. This crate models its four operation modes as the
//! [`EngineRequest`] tagged variant, abstracts the engine behind the
//! [`AnalysisEngine`] trait, and provides [`DialyzerEngine`], which drives
//! the `dialyzer` executable as a subprocess.

#![warn(missing_docs)]

pub mod dialyzer;
pub mod engine;
pub mod error;
pub mod otp;
pub mod output;
pub mod request;

pub use dialyzer::DialyzerEngine;
pub use engine::AnalysisEngine;
pub use error::EngineError;
pub use otp::discover_otp_root;
pub use request::{EngineRequest, Operation};
