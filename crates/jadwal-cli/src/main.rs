// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use jadwal_core::{Locale, PaginationOptions, SearchOptions, TableOptions};
use jadwal_tui::UiOptions;
use runtime::{ShowcaseRuntime, ShowcaseSettings};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::OffsetDateTime;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JADWAL_LOG";

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
            "load config {}; run `jadwal --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_file()?;
    init_logging(&log_path, config.log_level())?;
    info!(config = %options.config_path.display(), "starting jadwal");

    let locale = options.locale.unwrap_or_else(|| config.locale());
    let mut runtime = ShowcaseRuntime::new(
        jadwal_testkit::member_directory(),
        ShowcaseSettings {
            mode: config.mode(),
            initial_sort: config.initial_sort(),
            page_size: config.page_size(),
            export_dir: config::data_dir()?,
            today: OffsetDateTime::now_utc().date(),
        },
        table_options(&config, locale),
    )?;

    if let Some(path) = &options.export_csv {
        let rows = runtime.export_to(path)?;
        println!("exported {rows} members to {}", path.display());
        return Ok(());
    }

    if options.check_only {
        return Ok(());
    }

    jadwal_tui::run_app(
        &mut runtime,
        UiOptions {
            compact_below: config.compact_below(),
            ..UiOptions::default()
        },
    )
}

fn table_options(config: &Config, locale: Locale) -> TableOptions {
    TableOptions {
        locale,
        preference: config.presentation(),
        card_sorting: config.card_sorting(),
        search: SearchOptions {
            enabled: config.searchable(),
            ..SearchOptions::default()
        },
        pagination: PaginationOptions {
            enabled: config.pagination(),
            ..PaginationOptions::default()
        },
        hints: config.hints(),
        ..TableOptions::default()
    }
}

/// Logs go to a file because the TUI owns the terminal. `JADWAL_LOG` takes
/// precedence over `[log].level`.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}; set [log].file to a writable path", path.display()))?;

    let filter = match env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("parse {LOG_ENV}={directives:?}"))?,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("parse [log].level {level:?}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    export_csv: Option<PathBuf>,
    locale: Option<Locale>,
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
        print_example: false,
        check_only: false,
        export_csv: None,
        locale: None,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--export-csv" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--export-csv requires a file path"))?;
                options.export_csv = Some(PathBuf::from(value.as_ref()));
            }
            "--locale" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--locale requires `en` or `ar`"))?;
                let locale = Locale::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!("unknown locale {:?}; use `en` or `ar`", value.as_ref())
                })?;
                options.locale = Some(locale);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("jadwal: bilingual member directory table");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and table setup, then exit");
    println!("  --export-csv <path>      Write the directory as CSV and exit");
    println!("  --locale <en|ar>         Override [ui].locale");
    println!("  --help                   Show this help");
}
