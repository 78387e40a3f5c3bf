use clap::Parser;
use fieldcrypt::cli::{commands, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    fieldcrypt::logging::init(&cli.log_level);

    let result = match cli.command {
        Commands::Hash { ref password } => commands::hash::execute(&cli, password.as_deref()),
        Commands::Verify {
            ref hash,
            ref password,
        } => commands::verify::execute(&cli, hash, password.as_deref()),
        Commands::Encrypt {
            ref value,
            deterministic,
        } => commands::encrypt::execute(&cli, value.as_deref(), deterministic),
        Commands::Decrypt {
            ref payload,
            deterministic,
        } => commands::decrypt::execute(&cli, payload, deterministic),
        Commands::Matches {
            ref stored,
            ref value,
        } => commands::matches::execute(&cli, stored, value.as_deref()),
        Commands::Inspect { ref payload } => commands::inspect::execute(payload),
        Commands::Keygen => commands::keygen::execute(),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        fieldcrypt::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
