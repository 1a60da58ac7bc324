//! DET: Dossier Electoral Toolkit
//!
//! A small toolkit that assembles the supporting-document checklist for
//! registering on the French electoral rolls: pick a situation, tick the
//! documents you hold, get a printable checklist.

pub mod catalog;
pub mod cli;
pub mod core;
pub mod schema;
