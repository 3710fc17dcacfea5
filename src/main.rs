use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use resgen::config::DEFAULT_CONFIG_FILE;
use resgen::{CollisionPolicy, GenerationMode, ProjectConfig, ResourceGenerator};
use tracing_subscriber::EnvFilter;

/// Generate a resource manifest and a typed Java accessor class.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project directory every relative path is resolved against
  #[arg(long, value_name = "DIR", default_value = ".")]
  project_dir: PathBuf,

  /// Configuration file (defaults to resgen.config.json in the project directory)
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Resource root, relative to the project directory; replaces the configured roots
  #[arg(long = "root", value_name = "DIR")]
  roots: Vec<String>,

  /// Manifest representation
  #[arg(long, value_enum)]
  mode: Option<GenerationMode>,

  /// Package of the generated class
  #[arg(long)]
  package: Option<String>,

  /// Simple name of the generated class
  #[arg(long)]
  class_name: Option<String>,

  /// Annotate the accessor and report compile-only dependencies
  #[arg(long)]
  inject_dependencies: bool,

  /// Abort when two resources derive the same key or constant name
  #[arg(long)]
  fail_on_collision: bool,

  /// Log discovery and collision details
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn project_config(&self) -> Result<ProjectConfig> {
    let mut config = match &self.config {
      Some(path) => ProjectConfig::from_path(path),
      None => ProjectConfig::discover(&self.project_dir),
    }
    .with_context(|| {
      let path = self
        .config
        .clone()
        .unwrap_or_else(|| self.project_dir.join(DEFAULT_CONFIG_FILE));
      format!("failed to load configuration from {}", path.display())
    })?;

    if !self.roots.is_empty() {
      config.resource_dirs = self.roots.clone();
    }
    if let Some(mode) = self.mode {
      config.generation_type = mode;
    }
    if let Some(package) = &self.package {
      config.target_package = Some(package.clone());
    }
    if let Some(class_name) = &self.class_name {
      config.class_name = class_name.clone();
    }
    if self.inject_dependencies {
      config.inject_dependencies = true;
    }
    if self.fail_on_collision {
      config.collision_policy = CollisionPolicy::Fail;
    }
    Ok(config)
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let config = cli.project_config()?.resolve(&cli.project_dir);
  let generator = ResourceGenerator::new(config);
  let report = generator
    .generate()
    .with_context(|| format!("resource generation failed in {}", cli.project_dir.display()))?;

  println!("Registered {} resources ({:?} mode)", report.resource_count, report.mode);
  for artifact in &report.artifacts {
    println!("  wrote {}", artifact.display());
  }
  for collision in &report.collisions {
    println!(
      "  {} `{}` now points to {} (shadowed {})",
      collision.kind, collision.name, collision.winner, collision.shadowed
    );
  }
  if !report.compile_only_dependencies.is_empty() {
    println!("Compile-only dependencies:");
    for notation in &report.compile_only_dependencies {
      println!("  {notation}");
    }
  }
  Ok(())
}
