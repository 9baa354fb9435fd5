use crate::error::Result;
use crate::testing::{CorrelationResult, HypothesisTestResult, IntervalResult};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

pub mod correlation;

pub mod interval;

pub mod parametric;

pub use correlation::{CorrelationInput, correlation};
pub use interval::{IntervalInput, confidence_interval};
pub use parametric::{TTestInput, ZTestInput, t_test, z_test};

/// A calculator input that knows which computation it feeds.
pub trait Calculate {
    type Output;

    fn calculate(&self) -> Result<Self::Output>;
}

impl Calculate for TTestInput {
    type Output = HypothesisTestResult;

    fn calculate(&self) -> Result<Self::Output> {
        t_test(self)
    }
}

impl Calculate for ZTestInput {
    type Output = HypothesisTestResult;

    fn calculate(&self) -> Result<Self::Output> {
        z_test(self)
    }
}

impl Calculate for IntervalInput {
    type Output = IntervalResult;

    fn calculate(&self) -> Result<Self::Output> {
        confidence_interval(self)
    }
}

impl Calculate for CorrelationInput {
    type Output = CorrelationResult;

    fn calculate(&self) -> Result<Self::Output> {
        correlation(self)
    }
}

/// Any of the four calculator requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Calculation {
    TTest(TTestInput),
    ZTest(ZTestInput),
    ConfidenceInterval(IntervalInput),
    Correlation(CorrelationInput),
}

/// The result matching a [`Calculation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    TTest(HypothesisTestResult),
    ZTest(HypothesisTestResult),
    ConfidenceInterval(IntervalResult),
    Correlation(CorrelationResult),
}

impl Calculation {
    /// Dispatch to the matching calculator.
    pub fn run(&self) -> Result<Outcome> {
        match self {
            Calculation::TTest(input) => input.calculate().map(Outcome::TTest),
            Calculation::ZTest(input) => input.calculate().map(Outcome::ZTest),
            Calculation::ConfidenceInterval(input) => {
                input.calculate().map(Outcome::ConfidenceInterval)
            }
            Calculation::Correlation(input) => input.calculate().map(Outcome::Correlation),
        }
    }
}

/// Run many calculations in parallel. Results come back in input order.
///
/// Every calculator is a pure function of its input, so no coordination is needed.
pub fn run_batch(calculations: &[Calculation]) -> Vec<Result<Outcome>> {
    calculations.par_iter().map(Calculation::run).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatError;
    use crate::testing::ConfidenceLevel;

    fn sample_requests() -> Vec<Calculation> {
        vec![
            Calculation::TTest(TTestInput {
                sample_mean: 105.0,
                population_mean: 100.0,
                sample_sd: 15.0,
                sample_size: 25,
                alpha: 0.05,
            }),
            Calculation::ConfidenceInterval(IntervalInput {
                mean: 50.0,
                sd: 10.0,
                sample_size: 36,
                level: ConfidenceLevel::NinetyFive,
            }),
            Calculation::ZTest(ZTestInput {
                sample_mean: 102.0,
                population_mean: 100.0,
                population_sd: 0.0,
                sample_size: 36,
                alpha: 0.05,
            }),
            Calculation::Correlation(CorrelationInput::new(
                vec![1.0, 2.0, 3.0],
                vec![2.0, 4.0, 6.0],
            )),
        ]
    }

    #[test]
    fn run_dispatches_by_kind() {
        let requests = sample_requests();
        assert!(matches!(requests[0].run(), Ok(Outcome::TTest(_))));
        assert!(matches!(requests[1].run(), Ok(Outcome::ConfidenceInterval(_))));
        assert!(matches!(
            requests[2].run(),
            Err(StatError::NonPositiveDeviation { .. })
        ));
        assert!(matches!(requests[3].run(), Ok(Outcome::Correlation(_))));
    }

    #[test]
    fn batch_matches_sequential() {
        let requests = sample_requests();
        let sequential: Vec<_> = requests.iter().map(Calculation::run).collect();
        assert_eq!(run_batch(&requests), sequential);
    }

    #[test]
    fn every_calculator_is_repeatable() {
        let t = TTestInput {
            sample_mean: 105.0,
            population_mean: 100.0,
            sample_sd: 15.0,
            sample_size: 25,
            alpha: 0.05,
        };
        assert_eq!(t_test(&t), t_test(&t));

        let z = ZTestInput {
            sample_mean: 102.0,
            population_mean: 100.0,
            population_sd: 15.0,
            sample_size: 36,
            alpha: 0.05,
        };
        assert_eq!(z_test(&z), z_test(&z));

        for sample_size in [36, 10] {
            let interval = IntervalInput {
                mean: 50.0,
                sd: 10.0,
                sample_size,
                level: ConfidenceLevel::NinetyFive,
            };
            assert_eq!(confidence_interval(&interval), confidence_interval(&interval));
        }

        let pairs = CorrelationInput::new(
            vec![1.0, f64::NAN, 2.0, 4.0, 5.0],
            vec![2.0, 1.0, 4.0, 3.0],
        );
        let first = correlation(&pairs);
        assert!(first.is_ok());
        assert_eq!(first, correlation(&pairs));
        // the input is left untouched by filtering
        assert_eq!(pairs.x.len(), 5);
    }

    #[test]
    fn trait_matches_free_function() {
        let input = CorrelationInput::new(vec![1.0, 2.0, 4.0], vec![1.0, 3.0, 2.0]);
        assert_eq!(input.calculate(), correlation(&input));
    }
}
