//! Per-user record files and their typed shapes.
//!
//! Four record kinds (vehicles, police records, licenses, tickets) are
//! stored as root-level JSON arrays in files named `<user id>.json`, one
//! directory per kind. The writer commands of the wider bot own those files;
//! this crate only ever reads them.

mod store;
mod types;

pub use store::{RecordKind, RecordStore, StoreError};
pub use types::{LicenseEntry, PoliceRecord, TicketRecord, Timestamp, VehicleRecord};
