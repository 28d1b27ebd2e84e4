#![deny(missing_docs)]
#![doc = "Error taxonomy and schema descriptors shared by the PAME simulation storage crates."]

pub mod errors;
pub mod provenance;

pub use errors::{ErrorInfo, StoreError};
pub use provenance::{SchemaVersion, StoreProvenance};
