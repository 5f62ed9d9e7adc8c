pub mod commands;
pub mod logger;
pub mod models;
pub mod storage;
pub mod suggest;
pub mod timeleft;
pub mod tui;
