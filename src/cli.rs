use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "student-records", version, about = "Console manager for student records")]
pub struct Cli {
    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Log in and open the interactive menu (default)
    Run,
    /// Create the database file and schema, then exit
    InitDb,
    /// Provision an admin account; the password is prompted for
    AddAdmin {
        #[arg(long)]
        username: String,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
