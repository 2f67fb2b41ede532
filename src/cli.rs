//! Command-line interface.
//!
//! The operation name is taken as a plain string and resolved by the
//! dispatcher, so an unknown name is reported as a dispatch error rather than
//! a parse error. Parse errors exit with clap's usage code (2).

use crate::friends::FriendId;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cozmonaut", version, about = "Companion robot control")]
pub struct Cli {
    /// Operation to run: friend-list, friend-remove or interact.
    pub operation: String,

    /// Path to the TOML config file (falls back to $COZMONAUT_CONFIG).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Target companion for friend-remove.
    #[arg(short, long, value_name = "ID", value_parser = FriendId::parse)]
    pub friend: Option<FriendId>,
}
