//! Per-package resolution: licenses onto the Nix vocabulary, dependency
//! names onto sibling packages.
//!
//! Both resolvers are pure apart from the warning side channel used for
//! unrecognized licenses.

pub mod dependencies;
mod license;

pub use dependencies::{link, link_for};
pub use license::{LicenseResolver, lookup_known_license};
