pub mod csv_table;
pub mod mx_classifier;
pub mod progress;
