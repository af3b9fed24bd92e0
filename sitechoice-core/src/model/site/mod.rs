mod modified_site;
mod scenario;
#[allow(clippy::module_inception)]
mod site;
pub mod site_attributes;
mod site_coefficients;

pub use modified_site::{ModifiedSite, SiteLocation};
pub use scenario::Scenario;
pub use site::{Site, SiteRecord};
pub use site_attributes::{SiteAttributes, ATTRIBUTE_NAMES, N_ATTRIBUTES};
pub use site_coefficients::SiteCoefficients;
