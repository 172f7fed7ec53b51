use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use penwriter::config::{Config, HeightConfig};
use penwriter::{Session, WriterSink, read_bounded, render, scale};

/// Write a text file with a pen-plotter robot using a stroke font.
#[derive(Parser, Debug)]
#[command(name = "penwriter", version, about)]
struct Args {
    /// Text file to write out
    #[arg(short, long, value_name = "FILE")]
    text: PathBuf,

    /// Character height in millimetres; asked for when omitted
    #[arg(short = 'H', long, value_name = "MM")]
    height: Option<f64>,

    /// Stroke font definition, instead of the bundled font
    #[arg(short, long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to send commands (a file or serial device); stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum line width, overriding the configuration
    #[arg(short, long, value_name = "UNITS")]
    width: Option<i32>,

    /// Log layout decisions
    #[arg(short, long)]
    verbose: bool,
}

/// Ask on stdin until a height inside the accepted range is given.
fn prompt_height(range: &HeightConfig) -> Result<f64> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        eprint!(
            "Enter the text height in mm ({} to {}): ",
            range.min, range.max
        );
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            bail!("no text height given");
        };
        match line?.trim().parse::<f64>() {
            Ok(height) if range.accepts(height) => return Ok(height),
            _ => eprintln!("Height must be a number from {} to {}.", range.min, range.max),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(path) = args.font {
        config.font.path = Some(path);
    }
    if let Some(width) = args.width {
        config.page.max_line_width = width;
    }

    let font = config.load_font().context("loading font")?;
    info!("Font ready with {} glyphs", font.glyph_count());

    let height = match args.height {
        Some(height) if config.height.accepts(height) => height,
        Some(height) => bail!(
            "text height {height} is outside {} to {}",
            config.height.min,
            config.height.max
        ),
        None => prompt_height(&config.height)?,
    };
    let scaled = scale(&font, height)?;

    let text = File::open(&args.text)
        .and_then(|file| read_bounded(file, config.text.max_bytes))
        .with_context(|| format!("reading {}", args.text.display()))?;
    info!("Writing {} bytes of text at height {height}", text.len());

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut session = Session::new(WriterSink::new(writer));
    let drawn = session.draw_and_flush(render(&text, &scaled, config.layout_params(height)))?;
    info!(
        "Finished: {drawn} drawing commands, {} in total",
        session.commands_sent()
    );

    Ok(())
}
