//! Installation Report CLI
//!
//! The entry point for ir-core, handling:
//! - Rendering the printable report from a file-backed store
//! - Upstream writes of installation data and report form data
//! - Store inspection and cleanup

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use ir_common::OutputFormat;
use ir_core::config::{load_config, ConfigOptions, ResolvedConfig};
use ir_core::exit_codes::ExitCode;
use ir_core::logging::{init_logging, LogConfig};
use ir_core::navigation::{Route, ViewHost};
use ir_core::view::{ReportContext, ReportView, ViewOutcome, ViewState};
use ir_report::config::CONFIG_SCHEMA_VERSION;
use ir_store::{FileStore, ReportStore, StoreError, StoreWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Installation Report - printable water conservation installation reports
#[derive(Parser)]
#[command(name = "ir-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Report configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store file holding installationData and reportFormData
    #[arg(long, global = true, env = "IR_STORE")]
    store: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the report from stored data
    Render(RenderArgs),

    /// Write, inspect or clear stored report data
    Store(StoreArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Write HTML to FILE instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StoreArgs {
    #[command(subcommand)]
    command: StoreCommands,
}

#[derive(Subcommand, Debug)]
enum StoreCommands {
    /// Store installation rows from a JSON array file
    ImportRecords {
        /// JSON file with an array of row objects
        file: PathBuf,
    },
    /// Store report form data from a JSON object file
    ImportForm {
        /// JSON file with clientName, preparedBy, reportDate, introduction, conclusion
        file: PathBuf,
    },
    /// List stored keys and sizes
    Show,
    /// Remove stored report data
    Clear,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Clean,
                _ => ExitCode::ArgsError,
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    // JSON payloads pair with JSONL logs on stderr
    init_logging(&LogConfig::new(
        cli.global.format,
        cli.global.verbose,
        cli.global.quiet,
    ));

    let exit_code = match cli.command {
        Commands::Render(args) => run_render(&cli.global, &args),
        Commands::Store(args) => run_store(&cli.global, &args),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

/// Host for the CLI: records where the view navigated.
///
/// Printing is left to whoever opens the HTML.
#[derive(Default)]
struct CliHost {
    redirect: Option<Route>,
}

impl ViewHost for CliHost {
    fn navigate(&mut self, route: Route) {
        self.redirect = Some(route);
    }

    fn print(&mut self) {
        debug!("Print requested; open the rendered HTML to print");
    }
}

fn run_render(global: &GlobalOpts, args: &RenderArgs) -> ExitCode {
    let resolved = match resolve_config(global) {
        Ok(resolved) => resolved,
        Err(code) => return code,
    };
    let store = match open_store(global) {
        Ok(store) => store,
        Err(code) => return code,
    };

    let consolidator = resolved.config.consolidator();
    let ctx = ReportContext {
        store: &store,
        consolidator: &consolidator,
        config: &resolved.config.report,
    };
    let mut host = CliHost::default();
    let view = ReportView::mount(&ctx, &mut host);

    let outcome = match view.render() {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Report rendering failed");
            output_error(global, "render", &e.to_string());
            return ExitCode::InternalError;
        }
    };

    match outcome {
        ViewOutcome::Redirected { route } => {
            let (kind, reason) = match view.state() {
                ViewState::Redirected { reason, .. } => (reason.kind(), reason.to_string()),
                _ => ("redirect", String::new()),
            };
            let path = route.path(&resolved.config.report.routes);
            match global.format {
                OutputFormat::Json => {
                    let payload = serde_json::json!({
                        "command": "render",
                        "status": "redirect",
                        "render_id": view.render_id(),
                        "route": path,
                        "reason": kind,
                        "message": reason,
                    });
                    eprintln!("{}", payload);
                }
                OutputFormat::Human => {
                    eprintln!("redirect to {} ({}): {}", path, kind, reason);
                }
            }
            debug!(redirect = ?host.redirect, "View redirected");
            ExitCode::DataError
        }
        ViewOutcome::Rendered {
            html,
            detail_pages,
            total_units,
            generated_at,
        } => write_html(
            global,
            args,
            view.render_id(),
            &html,
            serde_json::json!({
                "status": "rendered",
                "detail_pages": detail_pages,
                "total_units": total_units,
                "generated_at": generated_at.to_rfc3339(),
            }),
        ),
        ViewOutcome::Placeholder { html } => write_html(
            global,
            args,
            view.render_id(),
            &html,
            serde_json::json!({
                "status": "empty",
                "detail_pages": 0,
                "total_units": 0,
            }),
        ),
    }
}

fn write_html(
    global: &GlobalOpts,
    args: &RenderArgs,
    render_id: &str,
    html: &str,
    mut summary: serde_json::Value,
) -> ExitCode {
    let Some(out) = &args.out else {
        print!("{}", html);
        return ExitCode::Clean;
    };

    if let Err(e) = std::fs::write(out, html) {
        error!(path = %out.display(), error = %e, "Failed to write report");
        output_error(global, "render", &format!("{}: {}", out.display(), e));
        return ExitCode::IoError;
    }
    info!(path = %out.display(), bytes = html.len(), "Report written");

    match global.format {
        OutputFormat::Json => {
            summary["command"] = "render".into();
            summary["render_id"] = render_id.into();
            summary["path"] = out.display().to_string().into();
            summary["bytes"] = html.len().into();
            print_json(&summary);
        }
        OutputFormat::Human => {
            println!(
                "Report written to {} ({} units, {} detail pages)",
                out.display(),
                summary["total_units"],
                summary["detail_pages"]
            );
        }
    }
    ExitCode::Clean
}

fn run_store(global: &GlobalOpts, args: &StoreArgs) -> ExitCode {
    let mut store = match open_store(global) {
        Ok(store) => store,
        Err(code) => return code,
    };

    match &args.command {
        StoreCommands::ImportRecords { file } => {
            let content = match read_input(global, file) {
                Ok(content) => content,
                Err(code) => return code,
            };
            match StoreWriter::new(&mut store).write_records_json(&content) {
                Ok(count) => {
                    output_ok(
                        global,
                        serde_json::json!({
                            "command": "store import-records",
                            "status": "ok",
                            "records": count,
                        }),
                        &format!("Stored {} installation records", count),
                    );
                    ExitCode::Clean
                }
                Err(e) => store_failure(global, "store import-records", e),
            }
        }
        StoreCommands::ImportForm { file } => {
            let content = match read_input(global, file) {
                Ok(content) => content,
                Err(code) => return code,
            };
            match StoreWriter::new(&mut store).write_form_json(&content) {
                Ok(form) => {
                    output_ok(
                        global,
                        serde_json::json!({
                            "command": "store import-form",
                            "status": "ok",
                            "client_name": form.client_name,
                        }),
                        &format!("Stored report form for {}", form.client_name),
                    );
                    ExitCode::Clean
                }
                Err(e) => store_failure(global, "store import-form", e),
            }
        }
        StoreCommands::Show => show_store(global, &store),
        StoreCommands::Clear => match StoreWriter::new(&mut store).clear() {
            Ok(removed) => {
                output_ok(
                    global,
                    serde_json::json!({
                        "command": "store clear",
                        "status": "ok",
                        "removed": removed,
                    }),
                    &format!("Removed {} stored values", removed),
                );
                ExitCode::Clean
            }
            Err(e) => store_failure(global, "store clear", e),
        },
    }
}

fn show_store(global: &GlobalOpts, store: &FileStore) -> ExitCode {
    let keys = match store.keys() {
        Ok(keys) => keys,
        Err(e) => return store_failure(global, "store show", e),
    };

    let mut entries = Vec::new();
    for key in keys {
        let bytes = match store.get(&key) {
            Ok(value) => value.map(|v| v.len()).unwrap_or(0),
            Err(e) => return store_failure(global, "store show", e),
        };
        entries.push((key, bytes));
    }

    match global.format {
        OutputFormat::Json => {
            let keys: Vec<serde_json::Value> = entries
                .iter()
                .map(|(key, bytes)| serde_json::json!({ "key": key, "bytes": bytes }))
                .collect();
            print_json(&serde_json::json!({
                "command": "store show",
                "status": "ok",
                "path": store.path().display().to_string(),
                "keys": keys,
            }));
        }
        OutputFormat::Human => {
            println!("{}", store.path().display());
            if entries.is_empty() {
                println!("  (empty)");
            }
            for (key, bytes) in &entries {
                println!("  {:<20} {} bytes", key, bytes);
            }
        }
    }
    ExitCode::Clean
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "ir_core_version": env!("CARGO_PKG_VERSION"),
            "config_schema_version": CONFIG_SCHEMA_VERSION,
            "rust_version": env!("CARGO_PKG_RUST_VERSION"),
        })),
        OutputFormat::Human => {
            println!("ir-core {}", env!("CARGO_PKG_VERSION"));
            println!("config schema version: {}", CONFIG_SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_config(global: &GlobalOpts) -> Result<ResolvedConfig, ExitCode> {
    let options = ConfigOptions {
        config_path: global.config.clone(),
    };
    match load_config(&options) {
        Ok(resolved) => {
            debug!(
                source = ?resolved.path.as_ref().map(|p| p.display().to_string()),
                "Configuration resolved"
            );
            Ok(resolved)
        }
        Err(e) => {
            error!(error = %e, "Configuration error");
            output_error(global, "config", &e.to_string());
            Err(ExitCode::ArgsError)
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("installation-report")
        .join("store.json")
}

fn open_store(global: &GlobalOpts) -> Result<FileStore, ExitCode> {
    let path = global.store.clone().unwrap_or_else(default_store_path);
    FileStore::open(&path).map_err(|e| {
        error!(path = %path.display(), error = %e, "Cannot open store");
        output_error(global, "store", &e.to_string());
        ExitCode::IoError
    })
}

fn read_input(global: &GlobalOpts, path: &Path) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|e| {
        output_error(global, "read", &format!("{}: {}", path.display(), e));
        ExitCode::IoError
    })
}

fn store_failure(global: &GlobalOpts, command: &str, err: StoreError) -> ExitCode {
    error!(command, error = %err, "Store operation failed");
    output_error(global, command, &err.to_string());
    match err {
        StoreError::Io(_) | StoreError::Persist(_) => ExitCode::IoError,
        StoreError::InvalidValue { .. } | StoreError::Corrupted(_) | StoreError::Json(_) => {
            ExitCode::DataError
        }
    }
}

fn output_ok(global: &GlobalOpts, payload: serde_json::Value, human: &str) {
    match global.format {
        OutputFormat::Json => print_json(&payload),
        OutputFormat::Human => println!("{}", human),
    }
}

fn output_error(global: &GlobalOpts, command: &str, message: &str) {
    match global.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "command": command,
                "status": "error",
                "message": message,
            });
            eprintln!("{}", payload);
        }
        OutputFormat::Human => eprintln!("error: {}: {}", command, message),
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("error: failed to serialize output: {}", e),
    }
}
