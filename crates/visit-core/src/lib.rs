//! Visits, their statuses and actions, and the [`VisitStore`] trait.
//!
//! No runtime, no file I/O: the calendar engine and the stores build on these
//! types.

pub mod error;
pub mod status;
pub mod store;
pub mod visit;

pub use error::{Error, Result};
pub use status::{VisitAction, VisitStatus, VisitType};
pub use store::VisitStore;
pub use visit::{Visit, VisitDate};
