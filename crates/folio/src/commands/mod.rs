//! CLI subcommands.

pub mod check;
pub mod export;
pub mod init;
pub mod list;
pub mod show;
pub mod tags;
pub mod toc;
