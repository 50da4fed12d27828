//! Form submission: transport, handler, DOM glue and the form panel.

pub mod api;
pub mod dom;
pub mod handler;
pub mod ui;

pub use handler::{FollowUp, FormSubmitHandler, SubmitOutcome};
