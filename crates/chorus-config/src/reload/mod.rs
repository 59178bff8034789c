//! Live config reload manager.
//!
//! Combines the file watcher with config loading so a running cache can pick
//! up a new capacity or webapp table without a restart.

mod manager;


pub use manager::ReloadManager;
