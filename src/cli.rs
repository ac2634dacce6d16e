use crate::{
    command::{render_command, CommandOptions},
    config::Config,
    doctor::{deploy_instructions, diagnose},
    engine::external::ExternalConverter,
    invoker::Invoker,
    request::{ConversionRequest, Theme},
    status::{FnSink, NullSink, Status},
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "pdf2html-front")]
#[command(about = "Front-end for the pdf2html converter")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./pdf2html-front.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the pdf2html executable is installed.
    Doctor {},
    /// Convert a single PDF.
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        opts: ConvertOpts,
    },
    /// Convert every PDF in a folder.
    Batch {
        #[arg(long)]
        folder: String,
        #[command(flatten)]
        opts: ConvertOpts,
    },
    /// Print the equivalent pdf2html command line.
    Command {
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        opts: ConvertOpts,
    },
    /// Print deployment instructions.
    Deploy {},
}

#[derive(clap::Args, Debug, Clone)]
pub struct ConvertOpts {
    /// Output directory. Defaults to defaults.output_dir from the config.
    #[arg(long)]
    pub out_dir: Option<String>,
    #[arg(long)]
    pub body_only: bool,
    #[arg(long)]
    pub no_toc: bool,
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,
    /// Print the final report as JSON instead of status lines.
    #[arg(long)]
    pub json: bool,
}

impl ConvertOpts {
    fn output_dir(&self, cfg: &Config) -> String {
        self.out_dir
            .clone()
            .unwrap_or_else(|| cfg.defaults.output_dir.clone())
    }

    fn request(&self, cfg: &Config, source: PathBuf, batch: bool) -> ConversionRequest {
        ConversionRequest::new(source, self.output_dir(cfg))
            .body_only(self.body_only)
            .no_toc(self.no_toc)
            .theme(self.theme.unwrap_or(cfg.defaults.theme))
            .batch(batch)
    }
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg).as_deref())?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg),
        Command::Convert { input, opts } => {
            let req = opts.request(&cfg, input.clone(), false);
            convert(&cfg, &req, opts.json)
        }
        Command::Batch { folder, opts } => {
            let req = opts.request(&cfg, PathBuf::from(folder), true);
            convert(&cfg, &req, opts.json)
        }
        Command::Command { input, opts } => {
            let out = opts.output_dir(&cfg);
            let cmd = CommandOptions {
                source: input.as_deref(),
                output_dir: &out,
                body_only: opts.body_only,
                no_toc: opts.no_toc,
                theme: opts.theme.unwrap_or(cfg.defaults.theme),
            };
            println!("{}", render_command(&cfg, &cmd));
            Ok(())
        }
        Command::Deploy {} => {
            println!("{}", deploy_instructions());
            Ok(())
        }
    }
}

/// Loads `user`, else ./pdf2html-front.toml, else the built-in defaults.
pub fn load_config(user: Option<&Path>) -> Result<Config> {
    match resolve_config_path(user) {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from("pdf2html-front.toml");
    default.exists().then_some(default)
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries conversion output, so log lines go to stderr.
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    let out = cfg.defaults.output_dir.trim_end_matches('/');
    Some(Path::new(if out.is_empty() { "." } else { out }).join("pdf2html-front.log"))
}

fn doctor(cfg: &Config) -> Result<()> {
    let diag = diagnose(&ExternalConverter::new(cfg));
    println!("{}", diag.message);
    Ok(())
}

fn convert(cfg: &Config, req: &ConversionRequest, json: bool) -> Result<()> {
    let invoker = Invoker::new(cfg, ExternalConverter::new(cfg));
    let diag = diagnose(invoker.converter());
    if !diag.found {
        warn!("{}", diag.message);
    }

    let report = if json {
        invoker.run(req, &mut NullSink)
    } else {
        let mut printer = FnSink(|status: Status| println!("{status}"));
        invoker.run(req, &mut printer)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    info!("conversion ok={} args={:?}", report.ok, report.args);

    if !report.ok {
        return Err(anyhow!("conversion failed: {}", report.source.display()));
    }
    Ok(())
}
