pub mod tlk;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle TLK files
    Tlk {
        #[command(subcommand)]
        command: tlk::TlkCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Tlk { command } => command.handle(),
        }
    }
}
