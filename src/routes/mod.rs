//! Route modules for the annotation server

pub mod annotations;
pub mod document;
pub mod health;
pub mod labels;
pub mod page;
pub mod selection;
pub mod sessions;
