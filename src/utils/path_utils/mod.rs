mod expansion;
mod file_checks;

pub use file_checks::{check_parent_dir_writable, check_readable_file, read_value_from_file};
