//! # Ratesense Analytics Engine
//!
//! This crate provides the tools for estimating how sensitive an insurer's
//! book equity is to moves in long-term market interest rates.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function is a pure transformation of
//!   its inputs. Raw series go in, an aligned frame, change series and a
//!   duration estimate come out. This makes the pipeline highly reliable,
//!   bit-reproducible and easy to test.
//!
//! ## Public API
//!
//! - `aligner`: quarter-axis generation and carry-forward alignment.
//! - `changes`: period-over-period change derivation.
//! - `duration`: the per-period and summary duration estimator.
//! - `AnalysisReport`: the standardized response structure for one request.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod changes;
pub mod duration;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use duration::{DurationEstimate, DurationParams};
pub use error::AnalyticsError;
pub use report::{AnalysisReport, RateSourceReport};
