//! Request shells around the topology engine.
//!
//! Services resolve identifiers through the injected collaborators, hand
//! the resolved line to the engine, and project the result into read
//! views. They know nothing about HTTP.

mod error;
mod guard;
mod lines;
mod stations;
mod view;

pub use error::ServiceError;
pub use guard::ReferenceGuard;
pub use lines::LineService;
pub use stations::StationService;
pub use view::{LineView, StationView};
