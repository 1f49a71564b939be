use clap::{Args, Subcommand};

pub mod decode;
pub mod encode;

use crate::cli::op::Op;

crate::command_enum! {
    (Encode, encode::Encode),
    (Decode, decode::Decode),
}

pub type KeyCommand = Command;

/// Convert keys between hex and the base64 config form
#[derive(Args, Debug, Clone)]
pub struct Key {
    #[command(subcommand)]
    pub command: KeyCommand,
}

impl Op for Key {
    type Error = OpError;
    type Output = OpOutput;

    fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx)
    }
}
