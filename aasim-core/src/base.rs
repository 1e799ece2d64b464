//! Core functionalities.
mod env;
mod policy;
mod step;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// Observation of an environment.
pub trait Obs: Clone + Debug {
    /// Returns the number of scalar elements in the observation.
    fn len(&self) -> usize;

    /// Returns `true` if the observation has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Action applied to an environment.
///
/// Environments treat actions as opaque; they are handed over to the
/// underlying dynamics without inspection.
pub trait Act: Clone + Debug {}
