mod format;
mod generate;

pub use format::format_files;
pub use generate::{generate_files, plan_files, GenerateOptions, PlannedFile};
