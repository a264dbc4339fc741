//! portal-ui - Presentation controllers for the portal template
//!
//! Controllers are generic over a [`dom::Host`], so the same code drives the
//! browser (see `portal-web`) and the in-memory page used by the tests.

pub mod boot;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use boot::Portal;
pub use config::PortalConfig;
pub use dom::{Dom, DomEvent, Host, KeyValueStore, Scheduler, TimerId};
pub use error::UiError;
