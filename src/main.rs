use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let cli = weekgrid::cli::Cli::parse();
    let config = weekgrid::AppConfig::discover(cli.data_dir.clone())?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    weekgrid::commands::execute(&config, cli.command, &mut handle)
}
