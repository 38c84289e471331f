use std::fs::{self, File};
use std::io::{self, BufReader, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use wkpdf::{Generator, Page};

use super::args::CliArgs;
use super::errors::AppError;

const STDIN_INPUT: &str = "-";

fn load_generator(args: &CliArgs) -> Result<Generator, AppError> {
    match &args.preset {
        Some(path) => {
            let file = File::open(path)?;
            let generator =
                Generator::from_json(BufReader::new(file)).map_err(|source| AppError::Preset {
                    path: path.clone(),
                    source,
                })?;
            info!("Loaded preset {:?}", path);
            Ok(generator)
        }
        None => Ok(Generator::default()),
    }
}

fn build_generator(args: &CliArgs) -> Result<Generator, AppError> {
    let stdin_inputs = args.inputs.iter().filter(|i| *i == STDIN_INPUT).count();
    if stdin_inputs > 1 {
        return Err(AppError::RepeatedStdin {
            count: stdin_inputs,
        });
    }

    let mut generator = load_generator(args)?;

    if let Some(size) = args.page_size {
        generator.global.page_size.set(size);
    }
    if let Some(orientation) = args.orientation {
        generator.global.orientation.set(orientation);
    }
    if let Some(dpi) = args.dpi {
        generator.global.dpi.set(dpi);
    }
    if args.grayscale {
        generator.global.grayscale.set(true);
    }
    if let Some(title) = &args.title {
        generator.global.title.set(title.as_str());
    }
    if let Some(top) = args.margin_top {
        generator.global.margin_top.set(top);
    }
    if let Some(bottom) = args.margin_bottom {
        generator.global.margin_bottom.set(bottom);
    }
    if let Some(left) = args.margin_left {
        generator.global.margin_left.set(left);
    }
    if let Some(right) = args.margin_right {
        generator.global.margin_right.set(right);
    }

    if let Some(cover) = &args.cover {
        generator.cover.set_input(cover.as_str());
    }
    if args.toc {
        generator.toc.include = true;
    }

    for input in &args.inputs {
        let mut page = if input == STDIN_INPUT {
            Page::from_reader(io::stdin())
        } else {
            Page::new(input.as_str())
        };
        if let Some(zoom) = args.zoom {
            page.options.zoom.set(zoom);
        }
        generator.add_page(page);
    }

    Ok(generator)
}

/// `RUST_LOG` when set and valid, otherwise debug output for this crate only.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wkpdf=debug"))
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(log_filter())
            .with_writer(io::stderr)
            .init();
    }

    if let Some(binary) = &args.binary {
        wkpdf::process::set_path(binary);
    }

    let mut generator = build_generator(&args)?;

    if let Some(path) = &args.save_preset {
        fs::write(path, generator.to_json()?)?;
        info!("Saved preset to {:?}", path);
    }

    if args.print_args {
        println!("{}", generator.arg_string());
        return Ok(());
    }

    if generator.input_groups().is_empty() {
        return Err(AppError::MissingArgument {
            arg: "<INPUTS>".to_string(),
        }
        .into());
    }

    generator.create().map_err(AppError::from)?;

    match &args.output {
        Some(path) => {
            let written = generator.write_file(path)?;
            info!("Wrote {} bytes to {:?}", written, path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(generator.bytes()?)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("wkpdf").chain(argv.iter().copied()))
    }

    #[test]
    fn flags_land_in_generator() {
        let args = parse(&[
            "--page-size",
            "a4",
            "--dpi",
            "300",
            "--toc",
            "--cover",
            "cover.html",
            "--zoom",
            "0.5",
            "a.html",
            "b.html",
        ]);
        let generator = build_generator(&args).unwrap();
        assert_eq!(
            generator.arg_string(),
            "--dpi 300 --page-size A4 cover cover.html toc \
             page a.html --zoom 0.500 page b.html --zoom 0.500 -"
        );
    }

    #[test]
    fn stdin_may_only_be_used_once() {
        let args = parse(&["-", "-"]);
        assert!(matches!(
            build_generator(&args),
            Err(AppError::RepeatedStdin { count: 2 })
        ));
    }

    #[test]
    fn non_finite_zoom_is_rejected_by_the_parser() {
        assert!(CliArgs::try_parse_from(["wkpdf", "--zoom", "NaN", "a.html"]).is_err());
        assert!(CliArgs::try_parse_from(["wkpdf", "--zoom", "inf", "a.html"]).is_err());
        let args = parse(&["--zoom", "0.5", "a.html"]);
        assert_eq!(args.zoom, Some(0.5));
    }

    #[test]
    fn log_filter_defaults_to_crate_debug() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(log_filter().to_string(), "wkpdf=debug");
    }
}
