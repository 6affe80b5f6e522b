//! # pageflow CLI
//!
//! Usage:
//!   pageflow input.json -o output.pdf
//!   echo '{ ... }' | pageflow -o output.pdf
//!   pageflow --example > resume.json
//!   pageflow resume.json --resume -o resume.pdf
//!   pageflow input.json --layout

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use pageflow::model::{Edges, PageSize};
use pageflow::resume::Resume;

#[derive(Parser)]
#[command(name = "pageflow")]
#[command(version)]
#[command(about = "Flow styled text and tables into pages and render them to PDF", long_about = None)]
struct Cli {
    /// Input JSON file (stdin if not specified)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "output.pdf")]
    output: PathBuf,

    /// Treat the input as a resume instead of a block document
    #[arg(long)]
    resume: bool,

    /// Print the page layout as JSON instead of writing a PDF
    #[arg(long)]
    layout: bool,

    /// Print an example resume to stdout and exit
    #[arg(long)]
    example: bool,

    /// Override the document's page size
    #[arg(long, value_enum)]
    page_size: Option<PageSizeArg>,

    /// Override the document's margins (points, all sides)
    #[arg(long, value_name = "POINTS")]
    margin: Option<f64>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PageSizeArg> for PageSize {
    fn from(size: PageSizeArg) -> Self {
        match size {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::A5 => PageSize::A5,
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::Legal => PageSize::Legal,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.example {
        println!("{}", serde_json::to_string_pretty(&Resume::sample())?);
        return Ok(());
    }

    let input = read_input(cli.input.as_deref())?;
    let mut document = if cli.resume {
        let resume: Resume = serde_json::from_str(&input).map_err(pageflow::Error::from)?;
        resume.snapshot().to_document()
    } else {
        pageflow::parse_document(&input)?
    };

    if let Some(size) = cli.page_size {
        document.page.size = size.into();
    }
    if let Some(margin) = cli.margin {
        document.page.margin = Edges::uniform(margin);
    }

    if cli.layout {
        println!("{}", pageflow::layout_info(&document)?);
        return Ok(());
    }

    let pdf_bytes = pageflow::render(&document)?;
    fs::write(&cli.output, &pdf_bytes)?;
    eprintln!(
        "✓ Written {} bytes to {}",
        pdf_bytes.len(),
        cli.output.display()
    );
    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
