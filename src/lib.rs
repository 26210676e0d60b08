pub mod cli;
pub mod console;
pub mod episodes;
pub mod error;
pub mod link_engine;
pub mod logging;
pub mod materialize;
pub mod naming;
pub mod prompt;
pub mod scanner;
