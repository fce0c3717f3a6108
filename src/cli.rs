use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

use crate::generate::session::Filter;
use crate::generate::{Options, generate};
use crate::utils::logger;
use crate::version::VERSION;

#[derive(Parser, Debug)]
#[command(name = "javabind", version = VERSION, about = "Java/JNI projection generator")]
pub struct JavabindCli {
    #[arg(long, global = true)]
    /// Dump the parsed metadata model as JSON before generation.
    dump_model: bool,

    #[command(subcommand)]
    command: Command,
}

impl JavabindCli {
    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generates the Java surface and JNI bridge units from a metadata file.
    Generate {
        metadata: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Namespace or `Namespace.Type` allow-list rule; repeatable.
        /// Everything is included when no rule is given.
        #[arg(long = "include", value_name = "RULE")]
        include: Vec<String>,
        /// Prefix prepended to metadata namespaces to form Java packages.
        #[arg(long, default_value = "")]
        package_base: String,
        /// Shared library name loaded by generated static initializers.
        #[arg(long)]
        shared_lib: Option<String>,
    },
    /// Loads and validates a metadata file without emitting anything.
    Check { metadata: PathBuf },
}

pub fn run() -> Result<()> {
    logger::init_logging();
    let cli = JavabindCli::parse();
    match cli.command() {
        Command::Generate {
            metadata,
            output,
            include,
            package_base,
            shared_lib,
        } => handle_generate(
            &cli,
            metadata,
            output,
            include.clone(),
            package_base,
            shared_lib.clone(),
        ),
        Command::Check { metadata } => handle_check(&cli, metadata),
    }
}

fn handle_generate(
    cli: &JavabindCli,
    metadata: &Path,
    output: &Path,
    include: Vec<String>,
    package_base: &str,
    shared_lib: Option<String>,
) -> Result<()> {
    let model = load_model(cli, metadata)?;
    let options = Options {
        package_base: package_base.to_string(),
        shared_lib,
        filter: Filter::new(include),
    };

    let artifacts = generate(&model, &options)?;

    for artifact in &artifacts {
        let path = output.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
        fs::write(&path, &artifact.contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(wrote = %path.display());
    }

    info!(artifacts = artifacts.len(), output = %output.display());
    println!(
        "{} {} units -> {}",
        "generated".green().bold(),
        artifacts.len(),
        output.display()
    );
    Ok(())
}

fn handle_check(cli: &JavabindCli, metadata: &Path) -> Result<()> {
    let model = load_model(cli, metadata)?;
    let types = model
        .namespaces
        .iter()
        .map(|ns| ns.types.len())
        .sum::<usize>();
    println!(
        "{} {} namespaces, {} types",
        "ok".green().bold(),
        model.namespaces.len(),
        types
    );
    Ok(())
}

fn load_model(cli: &JavabindCli, metadata: &Path) -> Result<javabind_meta::Model> {
    let model = javabind_meta::load_model(metadata)?;
    if model.namespaces.is_empty() {
        bail!("metadata at {} declares no namespaces", metadata.display());
    }
    if cli.dump_model {
        println!("{}", "== Model ==".bold());
        println!(
            "{}",
            serde_json::to_string_pretty(&model).context("failed to serialize model")?
        );
    }
    Ok(model)
}
