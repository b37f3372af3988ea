pub mod cliopt;
pub mod error;
pub mod generator;
pub mod model;
pub mod output;
pub mod runner;
