use clap::Parser;
use std::io::{self, IsTerminal};
use student_records::cli::{Cli, Command};
use student_records::{config::Config, Console, Controller, Repository, Session, SessionEnd};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so they stay out of the interactive prompts
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = cli.database.clone() {
        config = config.with_database_path(path);
    }

    let session = match Session::connect(&config).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    let repo = Repository::new(session);
    let masked = io::stdin().is_terminal();

    let code = match cli.command() {
        Command::InitDb => {
            println!("Database ready at {}", config.database_path);
            repo.close().await;
            0
        }
        Command::AddAdmin { username } => add_admin(repo, &username, masked).await,
        Command::Run => {
            let console = Console::new(io::stdin().lock(), io::stdout()).with_masked_passwords(masked);
            match Controller::new(console, repo).run().await {
                Ok((SessionEnd::LoginFailed, _)) => 1,
                Ok(_) => 0,
                Err(e) => {
                    eprintln!("Console error: {}", e);
                    1
                }
            }
        }
    };

    std::process::exit(code);
}

async fn add_admin(repo: Repository, username: &str, masked: bool) -> i32 {
    let mut console = Console::new(io::stdin().lock(), io::stdout()).with_masked_passwords(masked);
    let password = match console.prompt_password("Enter Password : ") {
        Ok(Some(p)) => p,
        Ok(None) => {
            eprintln!("No password given");
            repo.close().await;
            return 1;
        }
        Err(e) => {
            eprintln!("Failed to read password: {}", e);
            repo.close().await;
            return 1;
        }
    };

    let code = match repo.create_admin(username, &password).await {
        Ok(()) => {
            println!("Admin '{}' created", username.trim());
            0
        }
        Err(e) => {
            eprintln!("Failed to create admin: {}", e);
            1
        }
    };
    repo.close().await;
    code
}
