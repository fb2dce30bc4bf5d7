use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info, warn};

use fcall::render::{self, Registry};
use fcall::{FunctionStatement, Render, Substitute};

#[derive(Parser)]
#[command(name = "fcall")]
#[command(about = "Parse and render f('template', { key: value }) statements", long_about = None)]
struct Cli {
    /// Statement file; read from stdin when omitted
    file: Option<PathBuf>,

    /// Print the parsed statement as JSON instead of rendering it
    #[arg(long)]
    json: bool,

    /// Print the token stream instead of parsing
    #[arg(long, conflicts_with = "json")]
    tokens: bool,

    /// Renderer to use
    #[arg(long, default_value = render::DEFAULT_RENDERER)]
    renderer: String,

    /// Fail on placeholders with no matching variable (substitute renderer only; ignored otherwise)
    #[arg(long)]
    strict: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> fcall::Result<()> {
    let source = match &cli.file {
        Some(path) => {
            info!("reading {}", path.display());
            fs::read_to_string(path)?
        }
        None => io::read_to_string(io::stdin())?,
    };

    if cli.tokens {
        for token in fcall::tokenize(&source) {
            println!("{}:{}\t{}\t{:?}", token.pos.line, token.pos.column, token.kind, token.literal);
        }
        return Ok(());
    }

    let stmt = fcall::parse(&source)?;

    if cli.json {
        print_json(&stmt)?;
        return Ok(());
    }

    let renderer = select_renderer(cli)?;
    debug!("rendering with '{}'", cli.renderer);
    println!("{}", stmt.execute(renderer.as_ref())?);
    Ok(())
}

/// `--strict` only affects `substitute`; other renderers come from the registry.
fn select_renderer(cli: &Cli) -> fcall::Result<Arc<dyn Render>> {
    if cli.renderer == render::DEFAULT_RENDERER {
        return Ok(Arc::new(Substitute { strict: cli.strict }));
    }
    if cli.strict {
        warn!("--strict has no effect on renderer '{}'", cli.renderer);
    }
    Registry::with_builtins().get(&cli.renderer)
}

fn print_json(stmt: &FunctionStatement) -> fcall::Result<()> {
    let json = serde_json::to_string_pretty(stmt).map_err(io::Error::from)?;
    println!("{}", json);
    Ok(())
}
