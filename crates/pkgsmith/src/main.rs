//! pkgsmith - scaffold a new npm package

use clap::Parser;
use scaffolder_core::resolver::Flags;
use scaffolder_core::tui::{self, CreateArgs};
use scaffolder_core::{Language, ModuleFormat, PackageManager, TestRunner};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Filter directives for diagnostic logging, e.g. `PKGSMITH_LOG=debug`
const LOG_ENV: &str = "PKGSMITH_LOG";

#[derive(Parser, Debug)]
#[command(name = "pkgsmith")]
#[command(about = "Scaffold a new npm package")]
#[command(version)]
pub struct Args {
    /// Package name (scoped names like @scope/name are allowed)
    pub name: Option<String>,

    /// Accept the defaults for every question but the name
    #[arg(short, long)]
    pub yes: bool,

    /// Print the files that would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not install dependencies (also skips the build check)
    #[arg(long)]
    pub skip_install: bool,

    /// Do not offer to save author details
    #[arg(long)]
    pub no_save: bool,

    /// Delete the saved author profile and exit
    #[arg(long, conflicts_with = "show_config")]
    pub reset_config: bool,

    /// Print the saved author profile and exit
    #[arg(long)]
    pub show_config: bool,

    /// Source language
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Module format of the published package
    #[arg(long, value_enum)]
    pub module_format: Option<ModuleFormat>,

    /// Test runner
    #[arg(long, value_enum)]
    pub test_runner: Option<TestRunner>,

    /// Package manager used for install and scripts
    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManager>,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            name: args.name,
            yes: args.yes,
            dry_run: args.dry_run,
            skip_install: args.skip_install,
            no_save: args.no_save,
            flags: Flags {
                language: args.language,
                module_format: args.module_format,
                test_runner: args.test_runner,
                package_manager: args.package_manager,
            },
        }
    }
}

fn init_tracing() {
    // Silent unless asked for
    let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Prompts handle Ctrl+C themselves; this covers spinners and subprocesses
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();

    let args = Args::parse();

    let result = if args.show_config {
        tui::show_profile()
    } else if args.reset_config {
        tui::reset_profile()
    } else {
        scaffolder_core::run(args.into()).await
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = scaffolder_core::exit_code(&e);
            if code != 0 {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(code)
        }
    }
}
