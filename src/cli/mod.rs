//! Flag parsing (`args`), CLI-only failures (`errors`) and the
//! preset/flags → `Generator` → output pipeline (`runner`).
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
