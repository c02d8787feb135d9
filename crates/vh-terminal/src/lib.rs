//! Terminal adapter layer: configuration, logging, dependency wiring and
//! the line-based scanner used by the command line front end.

pub mod bootstrap;
pub mod scanner;

pub use scanner::StdinScanner;
