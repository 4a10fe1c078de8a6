//! Port traits for the external collaborators: data, config and reports.

pub mod config_port;
pub mod data_port;
pub mod report_port;
