use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ir::{RankDir, Splines};
use crate::theme::Theme;

/// Drawing-wide layout knobs handed to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDefaults {
    pub rank_dir: RankDir,
    pub splines: Splines,
    pub node_sep: f32,
    pub rank_sep: f32,
    pub pad: f32,
    pub size: (f32, f32),
    pub ratio: String,
    pub dpi: u32,
}

impl Default for GraphDefaults {
    fn default() -> Self {
        Self {
            rank_dir: RankDir::TopBottom,
            splines: Splines::Ortho,
            node_sep: 0.4,
            rank_sep: 0.7,
            pad: 0.4,
            size: (14.0, 18.0),
            ratio: "compress".to_string(),
            dpi: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster resolution for PNG output.
    pub dpi: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { dpi: 300 }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub graph: GraphDefaults,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::library_default(),
            graph: GraphDefaults::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    background: Option<String>,
    report_edge_color: Option<String>,
    team_accent: Option<String>,
    vacant_fill: Option<String>,
    vacant_border_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GraphFile {
    rank_dir: Option<RankDir>,
    splines: Option<Splines>,
    node_sep: Option<f32>,
    rank_sep: Option<f32>,
    pad: Option<f32>,
    size: Option<(f32, f32)>,
    ratio: Option<String>,
    dpi: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    dpi: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<ThemeFile>,
    graph: Option<GraphFile>,
    render: Option<RenderFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme) = parsed.theme {
        if let Some(v) = theme.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = theme.background {
            config.theme.background = v;
        }
        if let Some(v) = theme.report_edge_color {
            config.theme.report_edge.color = v;
        }
        if let Some(v) = theme.team_accent {
            config.theme.team.accent = v;
        }
        if let Some(v) = theme.vacant_fill {
            config.theme.vacant.fill = v;
        }
        if let Some(v) = theme.vacant_border_color {
            config.theme.vacant.border_color = v;
        }
    }

    if let Some(graph) = parsed.graph {
        if let Some(v) = graph.rank_dir {
            config.graph.rank_dir = v;
        }
        if let Some(v) = graph.splines {
            config.graph.splines = v;
        }
        if let Some(v) = graph.node_sep {
            config.graph.node_sep = v;
        }
        if let Some(v) = graph.rank_sep {
            config.graph.rank_sep = v;
        }
        if let Some(v) = graph.pad {
            config.graph.pad = v;
        }
        if let Some(v) = graph.size {
            config.graph.size = v;
        }
        if let Some(v) = graph.ratio {
            config.graph.ratio = v;
        }
        if let Some(v) = graph.dpi {
            config.graph.dpi = v;
        }
    }

    if let Some(render) = parsed.render
        && let Some(v) = render.dpi
    {
        config.render.dpi = v;
    }

    Ok(config)
}
