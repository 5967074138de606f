mod result;
mod runner;

pub use {
    result::CommandResult,
    runner::{CommandRunner, ProcessRunner},
};
