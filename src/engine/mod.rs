pub mod aggregator;
pub mod classifier;
pub mod constants;
pub mod yield_calc;

pub use aggregator::{CostAggregator, FanOutReport};
pub use classifier::{classify, thresholds, MatrixThresholds, Quadrant};
pub use constants::*;
pub use yield_calc::{compute_gross, LineComputation};
