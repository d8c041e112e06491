//! Config document storage
//!
//! Maps config IDs to `<root>/<id>.alloy` files and performs the raw byte
//! I/O behind the HTTP API.

mod file;

pub use file::{FileStore, StoreError};
