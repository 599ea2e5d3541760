//! Member CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::storage::{MemberRepository, RecordStore};

#[derive(Subcommand)]
pub enum MemberCommands {
    /// List every registered member
    List,
}

pub fn run(cmd: MemberCommands, store: &RecordStore, output: &Output) -> Result<()> {
    match cmd {
        MemberCommands::List => list_members(store, output),
    }
}

fn list_members(store: &RecordStore, output: &Output) -> Result<()> {
    let members = MemberRepository::new(store).find_all()?;

    if output.is_json() {
        output.data(&members);
    } else if members.is_empty() {
        println!("No members registered.");
    } else {
        for member in &members {
            println!("{} | {}", member.id, member.name);
        }
    }

    Ok(())
}
