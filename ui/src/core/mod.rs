//! Platform-agnostic plumbing shared by every feature: the DOM effect seam,
//! storage, language resolution, location and network helpers.

pub mod dom;
pub mod fetch;
pub mod lang;
pub mod location;
pub mod memory;
pub mod platform;
pub mod storage;
pub mod timing;
