pub mod analyzers;
pub mod error;
pub mod loader;
pub mod output;
pub mod parser;
pub mod roster;
pub mod session;
pub mod stats;
