//! Operator commands and the pipeline that carries them out
//!
//! A [`Command`] expands into an ordered list of [`ActionDescriptor`]s (see [`steps`]).
//! The [`Dispatcher`] gates them behind [`Preflight`] checks and hands them one at a time to
//! a [`RemoteExecutor`], stopping at the first failure.

pub mod action;
pub mod command;
pub mod dispatcher;
pub mod executor;
pub mod preflight;
pub mod steps;

pub use action::{ActionDescriptor, OperationKind};
pub use command::{Command, UnknownCommand};
pub use dispatcher::{DispatchError, Dispatcher, EXIT_FAILURE, EXIT_SUCCESS};
#[cfg(any(test, feature = "with_mocks"))]
pub use executor::MockRemoteExecutor;
pub use executor::{AnsibleExecutor, ExecutionResult, RemoteExecutor};
pub use preflight::{Preflight, PreflightError};
pub use steps::DescriptorError;
