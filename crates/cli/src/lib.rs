//! Parabench CLI library - composition root shared by the binary and its tests

pub mod args;
pub mod bench;
pub mod demo;
pub mod logging;
pub mod reporter;

pub use bench::Bench;
pub use reporter::ConsoleReporter;
