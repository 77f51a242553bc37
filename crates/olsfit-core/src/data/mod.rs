pub mod csv_parse;
pub mod split;
pub mod synthetic;

pub use csv_parse::{load_csv, load_csv_from_reader, Dataset, LoadError, RowIssue, RowIssueKind};
pub use split::{train_test_split, Split, SplitError};
pub use synthetic::{generate_linear_data, write_csv, Synthetic, SyntheticError};
