//! Data model for the metadata-to-Nix transformation.
//!
//! Raw [`PackageMetadata`] comes in from the resolver; the pipeline indexes it
//! with [`MetadataIndex`], resolves licenses and dependencies into
//! [`NormalizedPackageRecord`]s and hands those, together with
//! [`RunParameters`], to the renderer.

mod index;
mod license;
mod metadata;
mod record;

pub use index::*;
pub use license::*;
pub use metadata::*;
pub use record::*;
