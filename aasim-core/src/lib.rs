#![warn(missing_docs)]
//! Core abstractions for RC car tracking environments.
//!
//! The crate defines the interface between an environment and the external
//! training loop: [`Env`], the [`Step`] record it emits, the [`Policy`] that
//! drives it, and diagnostic [`record::Record`]s.
pub mod error;
pub mod evaluator;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod space;
pub use space::BoxSpace;
