//! Testing utilities for the trends SDK.
//!
//! Provides a mock transport and a fixed clock for testing applications
//! that use the SDK without network access.

mod mock;

pub use crate::clock::FixedClock;
pub use mock::{MockCall, MockResponse, MockTransport};
