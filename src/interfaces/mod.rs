//! Edges of the application: CSV input/output and console notifications.

pub mod console;
pub mod csv;
