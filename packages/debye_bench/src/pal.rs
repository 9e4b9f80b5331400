//! Platform abstraction layer for wall-clock timing.
//!
//! This module provides a platform abstraction that allows switching between
//! the real monotonic clock and a fake implementation whose time only moves
//! when a test advances it.

mod abstractions;
mod facade;
#[cfg(test)]
mod fake;
mod real;

pub(crate) use abstractions::Platform;
pub(crate) use facade::PlatformFacade;
#[cfg(test)]
pub(crate) use fake::FakePlatform;
