//! Single-file and batch orchestration around `tunnelconf-core`.

pub mod batch;
pub mod path_guard;
pub mod process;
pub mod report;
pub mod settings;
