//! UI widgets for displaying temperature data.

pub mod chart;
pub mod dialog;
pub mod help;
pub mod log_table;
pub mod readout;
pub mod statistics;
pub mod status_bar;

pub use chart::render_chart;
pub use dialog::{render_dialog, render_export_prompt};
pub use help::render_help;
pub use log_table::render_log_table;
pub use readout::render_readout;
pub use statistics::render_statistics;
pub use status_bar::render_status_bar;
