pub mod install;
mod prompt;

pub use install::{InstallError, InstallOptions, InstallReport};
