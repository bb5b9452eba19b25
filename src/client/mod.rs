pub mod ncss;

pub use ncss::{parse_csv_table, MetarRequest, NcssClient};
