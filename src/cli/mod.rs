//! Command-line interface for walking and checking critical paths.

pub mod commands;
pub mod config;
pub mod output;
