//! Trait definitions for the domain's external collaborators.
//!
//! Implementations live in `crate::infrastructure`; mocks are generated with
//! `mockall` for unit tests.
//!
//! - [`CollegeSource`] - The remote college backend
//! - [`PreferenceStore`] - Durable client preferences

pub mod college_source;
pub mod preference_store;

pub use college_source::CollegeSource;
pub use preference_store::PreferenceStore;

#[cfg(test)]
pub use college_source::MockCollegeSource;
#[cfg(test)]
pub use preference_store::MockPreferenceStore;
