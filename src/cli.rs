use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::chart::build_chart;
use crate::config::load_config;
use crate::dot::to_dot;
use crate::org::Org;
use crate::render;

#[derive(Parser, Debug)]
#[command(name = "orgchart", version, about = "Org chart generator (Graphviz backend)")]
pub struct Args {
    /// Output base path; the format extension is appended
    #[arg(short = 'o', long = "output", default_value = "orgchart")]
    pub output: PathBuf,

    /// Output formats (repeatable; defaults to pdf and png)
    #[arg(short = 'f', long = "format", value_enum)]
    pub formats: Vec<OutputFormat>,

    /// Roster JSON file; defaults to the built-in library organization
    #[arg(short = 'r', long = "roster")]
    pub roster: Option<PathBuf>,

    /// Config JSON file (theme/graph/render overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Raster resolution for PNG output
    #[arg(long = "dpi")]
    pub dpi: Option<u32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    #[cfg(feature = "png")]
    Png,
    Svg,
    Dot,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            #[cfg(feature = "png")]
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Dot => "dot",
        }
    }
}

/// Keeps the first occurrence of each format, in the order given.
fn dedupe_formats(formats: Vec<OutputFormat>) -> Vec<OutputFormat> {
    let mut seen = Vec::with_capacity(formats.len());
    for format in formats {
        if !seen.contains(&format) {
            seen.push(format);
        }
    }
    seen
}

fn default_formats() -> Vec<OutputFormat> {
    #[cfg(feature = "png")]
    {
        vec![OutputFormat::Pdf, OutputFormat::Png]
    }
    #[cfg(not(feature = "png"))]
    {
        vec![OutputFormat::Pdf]
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dpi) = args.dpi {
        config.graph.dpi = dpi;
        config.render.dpi = dpi;
    }

    let org = match &args.roster {
        Some(path) => Org::from_json_file(path)
            .with_context(|| format!("reading roster {}", path.display()))?,
        None => Org::library().clone(),
    };

    let graph = build_chart(&org, &config.theme, &config.graph)?;
    let dot_source = to_dot(&graph);

    let formats = dedupe_formats(if args.formats.is_empty() {
        default_formats()
    } else {
        args.formats.clone()
    });
    for format in formats {
        let path = args.output.with_extension(format.extension());
        match format {
            OutputFormat::Pdf => render::write_output_pdf(&dot_source, &path)?,
            #[cfg(feature = "png")]
            OutputFormat::Png => {
                render::write_output_png(&dot_source, &path, &config.render, &config.theme)?
            }
            OutputFormat::Svg => render::write_output_svg(&dot_source, &path)?,
            OutputFormat::Dot => render::write_dot(&dot_source, &path)?,
        }
        println!("Generated: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_formats_cover_pdf_and_png() {
        let formats = default_formats();
        assert_eq!(formats[0], OutputFormat::Pdf);
        #[cfg(feature = "png")]
        assert_eq!(formats[1], OutputFormat::Png);
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(OutputFormat::Dot.extension(), "dot");
    }

    #[test]
    fn non_adjacent_duplicate_formats_render_once() {
        let formats = dedupe_formats(vec![
            OutputFormat::Pdf,
            OutputFormat::Svg,
            OutputFormat::Pdf,
            OutputFormat::Dot,
            OutputFormat::Svg,
        ]);
        assert_eq!(
            formats,
            vec![OutputFormat::Pdf, OutputFormat::Svg, OutputFormat::Dot]
        );
    }
}
