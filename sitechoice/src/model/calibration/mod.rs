pub mod calibration_ops;
mod linear_fit;

pub use linear_fit::LinearFit;
