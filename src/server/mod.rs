//! HTTP transport for the card service
//!
//! Maps card outcomes onto HTTP: `NotFound` → 404, `InvalidParameter` → 400,
//! create → 201 with a `Location` header, update/delete → 204.

pub mod builder;
pub mod extractors;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use extractors::Caller;
pub use handlers::{CARDS_PATH, CardAppState};
