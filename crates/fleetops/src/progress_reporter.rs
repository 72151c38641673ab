//! Operator-facing status output

pub mod port;
#[cfg(test)]
pub(crate) mod recording;
pub mod terminal;
