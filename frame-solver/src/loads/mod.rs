//! Load types and load cases

mod distributed;
mod load_case;
mod nodal;
mod thermal;

pub use distributed::{DistributedLoad, LoadAxes};
pub use load_case::{LoadCase, LoadCaseId};
pub use nodal::NodalForce;
pub use thermal::Temperature;
