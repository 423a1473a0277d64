// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result};
use config::Config;
use quotedesk_app::AppState;
use quotedesk_db::{QuoteStore, Store};
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `quotedesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    logging::init_file_logging(&config.log_level(), &config.log_path()?)?;

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or QUOTEDESK_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    let mut quotes = QuoteStore::load(store)?;
    info!(
        db = %db_path.display(),
        count = quotes.len(),
        source = quotes.source().label(),
        "quote store ready"
    );

    if options.reset {
        quotes.reset()?;
        println!("saved quotes cleared; {} default quotes restored", quotes.len());
        return Ok(());
    }

    if options.dump {
        println!("{}", quotes.to_json()?);
        return Ok(());
    }

    if options.check_only {
        return Ok(());
    }

    let mut state = AppState::with_page_size(config.page_size());
    quotedesk_tui::run_app(&mut state, &mut quotes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    dump: bool,
    reset: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        dump: false,
        reset: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--dump" => {
                options.dump = true;
            }
            "--reset" => {
                options.reset = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.dump && options.reset {
        anyhow::bail!("--dump and --reset cannot be combined; run them one at a time");
    }

    Ok(options)
}

fn print_help() {
    println!("quotedesk");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Start from the default quotes (in-memory)");
    println!("  --check                  Validate config + DB, then exit");
    println!("  --dump                   Print the current quotes as JSON");
    println!("  --reset                  Forget saved quotes and restore the defaults");
    println!("  --help                   Show this help");
}
