//! Configuration initialization command.
//!
//! Runs the interactive setup wizard, or removes the configuration file when
//! `--delete` is given.

use crate::{
    libs::{config::Config, messages::Message},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if !Config::delete()? {
            msg_bail_anyhow!(Message::ConfigNotFound);
        }
        msg_success!(Message::ConfigDeleted);
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
