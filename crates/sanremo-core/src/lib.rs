// Library root: league state, snapshot persistence, and configuration.

pub mod config;
pub mod db;
pub mod league;
