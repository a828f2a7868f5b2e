//! Squad CLI library.
//!
//! This crate provides the command-line interface and interactive REPL
//! for talking to the agent team and editing its shared documents.

pub mod cli;
pub mod commands;
pub mod repl;
