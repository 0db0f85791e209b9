pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod hall_editor;
pub mod network;
pub mod scanner;
pub mod sorter;
pub mod store;
