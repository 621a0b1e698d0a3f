// Reports module - projection summaries and exports

pub mod projection;

pub use projection::{export_to_csv, sample_points, yearly_snapshots, YearlySnapshot};
