use serde::{Deserialize, Serialize};

use crate::ir::{ArrowHead, BorderStyle, EdgeStyle, LineStyle, NodeShape, NodeStyle};
use crate::org::Tier;

/// Visual style for one organizational tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStyle {
    pub fill: String,
    pub font_color: String,
    pub border_color: String,
    pub pen_width: f32,
    pub min_width: Option<f32>,
    pub title_size: f32,
    pub name_size: f32,
    pub cell_padding: u8,
}

/// Overrides applied to a role with no person assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacantStyle {
    pub fill: String,
    pub font_color: String,
    pub border_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEdgeStyle {
    pub color: String,
    pub pen_width: f32,
    pub arrow_size: f32,
}

/// Style of a team cluster and its internal coordination edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStyle {
    pub accent: String,
    pub fill: String,
    pub title_color: String,
    pub note_color: String,
    pub pen_width: f32,
    pub margin: f32,
    pub title_size: f32,
    pub note_size: f32,
    pub coordination_pen_width: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendStyle {
    pub border_color: String,
    pub fill: String,
    pub margin: f32,
    pub title_size: f32,
    pub entry_size: f32,
    pub text_color: String,
    pub muted_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub base_font_size: f32,
    pub background: String,
    pub node_margin: (f32, f32),
    pub dean: TierStyle,
    pub manager: TierStyle,
    pub coordinator: TierStyle,
    pub team_lead: TierStyle,
    pub staff: TierStyle,
    pub librarian: TierStyle,
    pub vacant: VacantStyle,
    pub report_edge: ReportEdgeStyle,
    pub team: TeamStyle,
    pub legend: LegendStyle,
}

impl Theme {
    /// The palette of the library org chart: deep blue for leadership, warm
    /// tones for the R&I team, muted grey for vacant positions.
    pub fn library_default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            base_font_size: 10.0,
            background: "white".to_string(),
            node_margin: (0.2, 0.12),
            dean: TierStyle {
                fill: "#1B3A5C".to_string(),
                font_color: "white".to_string(),
                border_color: "#0F2540".to_string(),
                pen_width: 2.5,
                min_width: Some(2.5),
                title_size: 14.0,
                name_size: 12.0,
                cell_padding: 4,
            },
            manager: TierStyle {
                fill: "#2E6B8A".to_string(),
                font_color: "white".to_string(),
                border_color: "#1D4F6B".to_string(),
                pen_width: 1.5,
                min_width: None,
                title_size: 9.0,
                name_size: 9.0,
                cell_padding: 2,
            },
            coordinator: TierStyle {
                fill: "#4A90B8".to_string(),
                font_color: "white".to_string(),
                border_color: "#2E6B8A".to_string(),
                pen_width: 1.5,
                min_width: None,
                title_size: 9.0,
                name_size: 9.0,
                cell_padding: 2,
            },
            team_lead: TierStyle {
                fill: "#C4956A".to_string(),
                font_color: "white".to_string(),
                border_color: "#8B6B3D".to_string(),
                pen_width: 1.5,
                min_width: None,
                title_size: 9.0,
                name_size: 9.0,
                cell_padding: 2,
            },
            staff: TierStyle {
                fill: "#D6E8F0".to_string(),
                font_color: "#1B3A5C".to_string(),
                border_color: "#A0C4D8".to_string(),
                pen_width: 1.5,
                min_width: None,
                title_size: 8.0,
                name_size: 8.0,
                cell_padding: 2,
            },
            librarian: TierStyle {
                fill: "#E8D5B7".to_string(),
                font_color: "#3D2B1F".to_string(),
                border_color: "#C4A882".to_string(),
                pen_width: 1.5,
                min_width: None,
                title_size: 8.0,
                name_size: 8.0,
                cell_padding: 2,
            },
            vacant: VacantStyle {
                fill: "#E8E8E8".to_string(),
                font_color: "#666666".to_string(),
                border_color: "#999999".to_string(),
            },
            report_edge: ReportEdgeStyle {
                color: "#5B6770".to_string(),
                pen_width: 1.5,
                arrow_size: 0.6,
            },
            team: TeamStyle {
                accent: "#C4956A".to_string(),
                fill: "#FFF8F0".to_string(),
                title_color: "#6B3A2E".to_string(),
                note_color: "#8B6B5E".to_string(),
                pen_width: 2.0,
                margin: 15.0,
                title_size: 11.0,
                note_size: 8.0,
                coordination_pen_width: 1.0,
            },
            legend: LegendStyle {
                border_color: "#CCCCCC".to_string(),
                fill: "#F8F8F8".to_string(),
                margin: 10.0,
                title_size: 10.0,
                entry_size: 8.0,
                text_color: "black".to_string(),
                muted_color: "#999999".to_string(),
            },
        }
    }

    pub fn tier(&self, tier: Tier) -> &TierStyle {
        match tier {
            Tier::Dean => &self.dean,
            Tier::Manager => &self.manager,
            Tier::Coordinator => &self.coordinator,
            Tier::TeamLead => &self.team_lead,
            Tier::Staff => &self.staff,
            Tier::Librarian => &self.librarian,
        }
    }

    /// Node style for a role. A vacant role keeps its tier's sizing but takes
    /// the muted fill, grey font and dashed border.
    pub fn node_style(&self, tier: Tier, vacant: bool) -> NodeStyle {
        let tier_style = self.tier(tier);
        if vacant {
            NodeStyle {
                fill: self.vacant.fill.clone(),
                font_color: self.vacant.font_color.clone(),
                border_color: self.vacant.border_color.clone(),
                border: BorderStyle::Dashed,
                pen_width: tier_style.pen_width,
                min_width: tier_style.min_width,
                shape: NodeShape::Box,
            }
        } else {
            NodeStyle {
                fill: tier_style.fill.clone(),
                font_color: tier_style.font_color.clone(),
                border_color: tier_style.border_color.clone(),
                border: BorderStyle::Solid,
                pen_width: tier_style.pen_width,
                min_width: tier_style.min_width,
                shape: NodeShape::Box,
            }
        }
    }

    /// Solid vee-arrow edge for a direct-reporting relation.
    pub fn report_edge_style(&self) -> EdgeStyle {
        EdgeStyle {
            color: self.report_edge.color.clone(),
            pen_width: self.report_edge.pen_width,
            line: LineStyle::Solid,
            arrow: ArrowHead::Vee {
                size: self.report_edge.arrow_size,
            },
        }
    }

    /// Dashed arrowless edge for a coordination relation inside a team.
    pub fn coordination_edge_style(&self) -> EdgeStyle {
        EdgeStyle {
            color: self.team.accent.clone(),
            pen_width: self.team.coordination_pen_width,
            line: LineStyle::Dashed,
            arrow: ArrowHead::None,
        }
    }

    /// Invisible edge used only to force vertical stacking in the legend.
    pub fn invisible_edge_style(&self) -> EdgeStyle {
        EdgeStyle {
            color: self.report_edge.color.clone(),
            pen_width: 1.0,
            line: LineStyle::Invisible,
            arrow: ArrowHead::None,
        }
    }
}
