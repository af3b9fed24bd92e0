pub mod block_group;
pub mod calibration;
pub mod distance;
pub mod population;
pub mod reference;
pub mod site;
