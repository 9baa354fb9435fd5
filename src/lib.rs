//! # inferential-calculators
//!
//! Small, pure calculators for teaching inferential statistics: a one-sample t-test, a
//! one-sample z-test, a confidence interval for a mean and Pearson's correlation coefficient.
//!
//! Critical values come from a fixed t-table using the nearest tabulated degrees of freedom,
//! and p-values are coarse step-function approximations. Neither is an exact distribution
//! computation; the numbers are meant for display next to a worked explanation.
//!
//! ## Core Features
//!
//! - **Hypothesis tests**: t-test and z-test with reject / fail-to-reject decisions
//! - **Confidence intervals**: z critical values for large samples, t-table for small ones
//! - **Correlation**: Pearson r with strength and direction classification
//! - **Validation**: every calculator returns either a result or a single [`error::StatError`]
//!
//! ## Quick Start
//!
//! ```
//! use inferential_calculators::testing::inference::{t_test, TTestInput};
//! use inferential_calculators::testing::Decision;
//!
//! let result = t_test(&TTestInput {
//!     sample_mean: 105.0,
//!     population_mean: 100.0,
//!     sample_sd: 15.0,
//!     sample_size: 25,
//!     alpha: 0.05,
//! })
//! .unwrap();
//!
//! assert_eq!(result.critical_value, 2.060);
//! assert_eq!(result.decision, Decision::FailToReject);
//! ```
//!
//! ## Module Organization
//!
//! - **[`testing`]**: Calculators, shared lookup tables, input parsing and result types
//! - **[`report`]**: Plain-text rendering of results
//! - **[`error`]**: Validation errors

pub mod error;
pub mod report;
pub mod testing;
