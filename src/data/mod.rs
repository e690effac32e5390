pub mod table;

pub use table::{parse_table, read_table};
