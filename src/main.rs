use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use radarchart::config::{ChartArgs, Config};
use radarchart::renderer::svg::SvgRenderer;

#[derive(Parser, Debug)]
#[command(name = "radarchart")]
#[command(author, version, about = "Radar chart renderer with SVG and terminal output")]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    chart: ChartArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the chart interactively in the terminal (default)
    #[cfg(feature = "terminal")]
    View,
    /// Write the chart as an SVG document
    Render {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a commented default config to the config directory
    InitConfig,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The viewer owns the terminal, so only warnings get through while it runs.
    let directive = match cli.command {
        None => "radarchart=warn",
        #[cfg(feature = "terminal")]
        Some(Command::View) => "radarchart=warn",
        Some(_) => "radarchart=info",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .init();

    match cli.command {
        Some(Command::InitConfig) => {
            let path = Config::init_default_config()?;
            println!("Wrote default config to {}", path.display());
            return Ok(());
        }
        Some(Command::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "radarchart", &mut io::stdout());
            return Ok(());
        }
        _ => {}
    }

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&cli.chart);

    match cli.command {
        Some(Command::Render { output }) => render_svg(&config, output),
        #[cfg(feature = "terminal")]
        _ => radarchart::display::terminal::run(config, cli.config),
        #[cfg(not(feature = "terminal"))]
        _ => render_svg(&config, None),
    }
}

fn render_svg(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let chart = config.build_chart()?;
    let mut svg = SvgRenderer::new(config.layout.width as f32, config.layout.height as f32);
    if let Some(bg) = config.layout.background {
        svg = svg.with_background(bg);
    }
    chart.draw(&mut svg);
    let document = svg.finish();

    match output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} axes to {}", chart.axes().len(), path.display());
        }
        None => io::stdout().write_all(document.as_bytes())?,
    }
    Ok(())
}
