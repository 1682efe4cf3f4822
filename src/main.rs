use clap::Parser as _;
use luxtronik::commands;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(clap::Parser)]
#[clap(version, about, author)]
enum Commands {
    Registers(commands::registers::Args),
    Read(commands::read::Args),
    Watch(commands::watch::Args),
    Write(commands::write::Args),
    Version(commands::version::Args),
}

fn end<E: std::error::Error>(r: Result<(), E>) {
    std::process::exit(match r {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            let mut cause = e.source();
            while let Some(e) = cause {
                eprintln!("  because: {e}");
                cause = e.source();
            }
            1
        }
    });
}

fn main() {
    let filter_description = std::env::var("LUXTRONIK_LOG").unwrap_or_else(|_| "warn".into());
    let filter = match filter_description.parse::<tracing_subscriber::filter::targets::Targets>() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("warning: ignoring LUXTRONIK_LOG: {e}");
            tracing_subscriber::filter::targets::Targets::new()
                .with_default(tracing::level_filters::LevelFilter::WARN)
        }
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    match Commands::parse() {
        Commands::Registers(args) => end(commands::registers::run(args)),
        Commands::Read(args) => end(commands::read::run(args)),
        Commands::Watch(args) => end(commands::watch::run(args)),
        Commands::Write(args) => end(commands::write::run(args)),
        Commands::Version(args) => end(commands::version::run(args)),
    }
}
