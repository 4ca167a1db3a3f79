//! Shared helpers for the serve command.

pub mod html;
pub mod mime;
