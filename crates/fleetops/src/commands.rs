//! Process execution abstractions and implementations

pub mod runner;
pub mod system;


pub use runner::{CommandError, CommandOutput, CommandRunner, Invocation};
pub use system::SystemCommandRunner;

#[cfg(any(test, feature = "with_mocks"))]
pub use runner::MockCommandRunner;
