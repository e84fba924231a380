use clap::Parser;
use squirrel::cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter (e.g. `debug`,
/// `squirrel=trace`).  Defaults to `warn`.
const LOG_ENV: &str = "SQUIRREL_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => squirrel::cli::commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref fields,
        } => squirrel::cli::commands::add::execute(&cli, title, fields),
        Commands::Show { id, reveal } => squirrel::cli::commands::show::execute(&cli, id, reveal),
        Commands::List {
            ref order,
            limit,
        } => squirrel::cli::commands::list::execute(&cli, order.as_deref(), limit),
        Commands::Edit {
            id,
            ref title,
            ref fields,
        } => squirrel::cli::commands::edit::execute(&cli, id, title.as_deref(), fields),
        Commands::Delete { id, force } => squirrel::cli::commands::delete::execute(&cli, id, force),
        Commands::Status { refresh } => squirrel::cli::commands::status::execute(&cli, refresh),
        Commands::Version => squirrel::cli::commands::version::execute(),
    };

    if let Err(e) = result {
        squirrel::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Install a stderr `fmt` subscriber filtered by `SQUIRREL_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}
