pub mod probability_ops;
