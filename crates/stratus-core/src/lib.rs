//! Core model types for Stratus architecture diagrams.
//!
//! A diagram is a set of typed nodes grouped into nested clusters plus a set
//! of labeled, styled edges between them. This crate holds that model and the
//! scoped [`builder`] used to declare it; linting and rendering live in the
//! `stratus` crate.

pub mod builder;
pub mod color;
pub mod identifier;
pub mod kind;
pub mod semantic;
pub mod style;
