//! bookshelf - library catalog service
//!
//! Subcommands:
//! - `serve`: run the HTTP API (`GET/POST /api/books`)
//! - `init-db`: create the books table and exit
//!
//! Settings come from flags, the environment, or a `.env` file in the
//! working directory.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::init_db::{run_init_db, InitDbArgs};
use commands::serve::{run_serve, ServeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    author,
    version,
    about = "Library catalog HTTP service backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create the database schema and exit
    InitDb(InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables take precedence
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::InitDb(args) => run_init_db(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::try_parse_from(["bookshelf", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.port(), 5000);
        assert!(!args.fail_fast);
        assert!(!args.memory);
    }

    #[test]
    fn memory_conflicts_with_fail_fast() {
        assert!(Cli::try_parse_from(["bookshelf", "serve", "--memory", "--fail-fast"]).is_err());
    }
}
