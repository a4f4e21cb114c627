//! Invokes the Graphviz `dot` backend: the description goes in on stdin, the
//! laid-out document comes back on stdout. PDF and SVG are taken straight
//! from the backend; PNG is rasterized locally from the backend's SVG so the
//! requested resolution is honored exactly.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;

#[cfg(feature = "png")]
use crate::config::RenderConfig;
#[cfg(feature = "png")]
use crate::theme::Theme;

const BACKEND: &str = "dot";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("graphviz `{BACKEND}` executable not found on PATH (install graphviz)")]
    BackendMissing,
    #[error("graphviz exited with {status}: {stderr}")]
    Backend { status: String, stderr: String },
    #[cfg(feature = "png")]
    #[error("backend SVG did not parse: {0}")]
    Svg(#[from] usvg::Error),
    #[cfg(feature = "png")]
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[cfg(feature = "png")]
    #[error("png write failed: {0}")]
    PngWrite(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Overrides the description's `dpi` attribute when the SVG is only an
/// intermediate for local rasterization; the raster config owns the
/// resolution, and the backend applying its own dpi scaling on top would
/// scale the output twice.
#[cfg(feature = "png")]
const RASTER_SVG_ARGS: &[&str] = &["-Gdpi=72"];

/// Runs the backend once for the given output format, returning the rendered
/// bytes. Blocking; any backend failure surfaces here and aborts the run.
pub fn invoke_backend(dot_source: &str, format: &str) -> Result<Vec<u8>, RenderError> {
    invoke(BACKEND, dot_source, format, &[])
}

fn invoke(
    program: &str,
    dot_source: &str,
    format: &str,
    extra_args: &[&str],
) -> Result<Vec<u8>, RenderError> {
    let mut child = Command::new(program)
        .arg(format!("-T{format}"))
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                RenderError::BackendMissing
            } else {
                RenderError::Io(err)
            }
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot_source.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(RenderError::Backend {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

pub fn write_output_pdf(dot_source: &str, output: &Path) -> Result<(), RenderError> {
    let bytes = invoke_backend(dot_source, "pdf")?;
    std::fs::write(output, bytes)?;
    Ok(())
}

pub fn render_svg(dot_source: &str) -> Result<String, RenderError> {
    let bytes = invoke_backend(dot_source, "svg")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_output_svg(dot_source: &str, output: &Path) -> Result<(), RenderError> {
    let svg = render_svg(dot_source)?;
    std::fs::write(output, svg)?;
    Ok(())
}

pub fn write_dot(dot_source: &str, output: &Path) -> Result<(), RenderError> {
    std::fs::write(output, dot_source)?;
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    dot_source: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<(), RenderError> {
    let bytes = invoke(BACKEND, dot_source, "svg", RASTER_SVG_ARGS)?;
    let svg = String::from_utf8_lossy(&bytes).into_owned();

    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();

    let tree = usvg::Tree::from_str(&svg, &opt)?;
    let (width, height, scale) = raster_dimensions(tree.size(), render_cfg.dpi);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::PixmapAlloc { width, height })?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap
        .save_png(output)
        .map_err(|err| RenderError::PngWrite(err.to_string()))?;
    Ok(())
}

/// Pixel size of the raster for an SVG of the given base (72 dpi) size.
#[cfg(feature = "png")]
fn raster_dimensions(size: usvg::Size, dpi: u32) -> (u32, u32, f32) {
    let scale = dpi as f32 / 72.0;
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    (width, height, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_backend_maps_to_a_dedicated_error() {
        let err = invoke("orgchart-no-such-backend", "digraph g {}", "svg", &[]).unwrap_err();
        assert!(matches!(err, RenderError::BackendMissing));
        assert!(err.to_string().contains("install graphviz"));
    }

    #[cfg(feature = "png")]
    #[test]
    fn raster_scales_the_base_size_exactly_once() {
        // 14x18 inches at the backend's base 72 dpi
        let size = usvg::Size::from_wh(1008.0, 1296.0).unwrap();
        let (width, height, scale) = raster_dimensions(size, 300);
        assert_eq!((width, height), (4200, 5400));
        assert_eq!(scale, 300.0 / 72.0);
    }

    #[cfg(feature = "png")]
    #[test]
    fn raster_svg_request_pins_the_backend_to_base_resolution() {
        assert!(RASTER_SVG_ARGS.contains(&"-Gdpi=72"));
    }
}
