//! Domain layer: entities, collaborator traits and the pure search engine.
//!
//! Nothing in this layer performs I/O. The remote backend and the preference
//! storage are reached only through the traits in [`repositories`].
//!
//! # Search pipeline
//!
//! 1. [`entities::SearchParams`] holds the raw form text
//! 2. [`query::build_query`] turns it into a [`query::CanonicalQuery`], walking
//!    the table in [`fields`]
//! 3. [`debounce::Debouncer`] delays the query until typing settles
//! 4. the resolver (see [`crate::application::services::SearchService`]) asks the
//!    backend, or evaluates [`filter::matches`] over the local dataset
//! 5. [`projection`] sorts, paginates and summarizes the result set

pub mod debounce;
pub mod entities;
pub mod fields;
pub mod filter;
pub mod projection;
pub mod query;
pub mod repositories;
