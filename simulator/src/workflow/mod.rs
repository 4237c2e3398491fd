pub mod config;
pub mod cue;
pub mod replay;
pub mod runner;
