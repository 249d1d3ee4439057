pub mod types;
pub mod helpers;
pub mod logger;
pub mod loader;
pub mod grouper;
pub mod assembler;
pub mod writer;
pub mod pipeline;
pub mod bible;

pub use bible::{run_assemble, AssembleConfig};
pub use pipeline::{run_split, SplitConfig, SplitReport};
pub use types::{DuplicatePolicy, JsonStyle, VersebookError};

/// Input document used when neither `--input` nor `VERSEBOOK_INPUT` is given.
pub static DEFAULT_INPUT_PATH: &str = "kjv_strongs.json";
pub static DEFAULT_OUTPUT_DIR: &str = "kjv_books";
