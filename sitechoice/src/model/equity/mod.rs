mod equity_evaluation;
pub mod equity_ops;

pub use equity_evaluation::{BlockGroupUtility, EquityEvaluation};
