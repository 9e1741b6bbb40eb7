//! Operations on an [`Arrangement`](crate::arrangement::Arrangement).
//!
//! Each operation is a small value built with `new` and run with `execute`.
//! Insertions take the arrangement mutably; queries borrow it shared.

pub mod insert;
pub mod query;
