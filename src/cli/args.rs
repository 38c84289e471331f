use clap::Parser;
use std::path::PathBuf;

use wkpdf::{Orientation, PageSize};

#[derive(Parser, Debug)]
#[command(name = "wkpdf", version, about = "Render HTML documents to PDF with wkhtmltopdf")]
pub struct CliArgs {
    /// Input documents (paths or URLs); `-` reads one document from standard input
    pub inputs: Vec<String>,

    /// Output PDF file; the PDF is written to standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cover page (path or URL)
    #[arg(long)]
    pub cover: Option<String>,

    /// Insert a table of contents after the cover
    #[arg(long, default_value_t = false)]
    pub toc: bool,

    /// Paper size
    #[arg(long, value_enum)]
    pub page_size: Option<PageSize>,

    /// Page orientation
    #[arg(long, value_enum)]
    pub orientation: Option<Orientation>,

    /// Output dpi
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Generate the PDF in grayscale
    #[arg(long, default_value_t = false)]
    pub grayscale: bool,

    /// Title of the PDF document
    #[arg(long)]
    pub title: Option<String>,

    /// Top margin in millimetres
    #[arg(long)]
    pub margin_top: Option<u32>,

    /// Bottom margin in millimetres
    #[arg(long)]
    pub margin_bottom: Option<u32>,

    /// Left margin in millimetres
    #[arg(long)]
    pub margin_left: Option<u32>,

    /// Right margin in millimetres
    #[arg(long)]
    pub margin_right: Option<u32>,

    /// Zoom factor applied to every input page
    #[arg(long, value_parser = parse_finite)]
    pub zoom: Option<f64>,

    /// Path to the wkhtmltopdf binary
    #[arg(long)]
    pub binary: Option<PathBuf>,

    /// Load options and pages from a JSON preset; inputs and flags are applied on top
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Save the final configuration as a JSON preset
    #[arg(long)]
    pub save_preset: Option<PathBuf>,

    /// Print the wkhtmltopdf arguments instead of running it
    #[arg(long, default_value_t = false)]
    pub print_args: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

fn parse_finite(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        Ok(_) => Err(format!("{value} is not a finite number")),
        Err(e) => Err(e.to_string()),
    }
}
