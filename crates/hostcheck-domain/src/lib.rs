//! Host-state assertion engine.
//!
//! Input: expectations built elsewhere, plus a [`HostInspector`] handle.
//! Output: one check record per expectation, in declaration order.
//!
//! The engine performs no I/O of its own; every host query goes through the provider.

#![forbid(unsafe_code)]

pub mod checks;
pub mod model;
pub mod provider;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use checks::{
    CheckResult, check, check_command, check_file, check_group, check_package,
    check_path_ownership, check_service_state, check_symlink, check_user, check_user_group,
};
pub use engine::{SessionAborted, evaluate};
pub use fingerprint::fingerprint_for_check;
pub use model::{Expectation, ExpectationError, ExpectationRecord, HostFact};
pub use provider::{HostInspector, ProviderError};
