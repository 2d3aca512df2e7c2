//! File-backed stores.
//!
//! Each store owns one kind of artefact under the data directory and is constructed from
//! a shared [`CoreConfig`](crate::CoreConfig).

pub mod dish;
pub(crate) mod helpers;
pub mod ignored;
pub mod mealplan;
