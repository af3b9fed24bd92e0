pub mod attractiveness_ops;
