//! Builds the graph description for an organization in one linear pass:
//! nodes for every role, one cluster per team with its coordination edges,
//! top-level report edges, and the legend cluster.

use crate::config::GraphDefaults;
use crate::ir::{
    BorderStyle, Cluster, ClusterStyle, Edge, Graph, GraphAttrs, GraphError, Node, NodeDefaults,
    NodeShape, NodeStyle,
};
use crate::label::{Label, LabelLine};
use crate::org::{Org, Role, Team};
use crate::theme::Theme;

pub const LEGEND_IDS: [&str; 3] = ["legend_report", "legend_coord", "legend_vacant"];

pub fn build_chart(org: &Org, theme: &Theme, defaults: &GraphDefaults) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(
        "OrgChart",
        GraphAttrs {
            rank_dir: defaults.rank_dir,
            splines: defaults.splines,
            node_sep: defaults.node_sep,
            rank_sep: defaults.rank_sep,
            bg_color: theme.background.clone(),
            pad: defaults.pad,
            dpi: defaults.dpi,
            size: defaults.size,
            ratio: defaults.ratio.clone(),
        },
        NodeDefaults {
            font_name: theme.font_family.clone(),
            font_size: theme.base_font_size,
            margin: theme.node_margin,
        },
    );

    for role in &org.roles {
        graph.add_node(role_node(role, theme))?;
    }

    for team in &org.teams {
        graph.add_cluster(team_cluster(team, theme));
    }

    // Report edges are declared after every node exists.
    let report_style = theme.report_edge_style();
    for role in &org.roles {
        if let Some(manager) = &role.manager {
            graph.add_edge(Edge {
                from: manager.clone(),
                to: role.id.clone(),
                style: report_style.clone(),
            });
        }
    }

    add_legend(&mut graph, theme)?;

    graph.validate()?;
    Ok(graph)
}

fn role_node(role: &Role, theme: &Theme) -> Node {
    let tier_style = theme.tier(role.tier);
    let mut lines: Vec<LabelLine> = role
        .title
        .iter()
        .map(|line| LabelLine::new(line, tier_style.title_size).bold())
        .collect();
    match &role.person {
        Some(person) => lines.push(LabelLine::new(person, tier_style.name_size)),
        None => lines.push(LabelLine::new("(Vacant)", tier_style.name_size).italic()),
    }
    Node {
        id: role.id.clone(),
        label: Label::new(lines).cell_padding(tier_style.cell_padding),
        style: theme.node_style(role.tier, role.is_vacant()),
    }
}

fn team_cluster(team: &Team, theme: &Theme) -> Cluster {
    let mut label_lines = vec![
        LabelLine::new(&team.label, theme.team.title_size)
            .bold()
            .color(&theme.team.title_color),
    ];
    if let Some(note) = &team.note {
        label_lines.push(LabelLine::new(note, theme.team.note_size).color(&theme.team.note_color));
    }

    let coordination = theme.coordination_edge_style();
    let edges: Vec<Edge> = team
        .members
        .iter()
        .map(|member| Edge {
            from: team.lead.clone(),
            to: member.clone(),
            style: coordination.clone(),
        })
        .collect();

    let mut members = Vec::with_capacity(team.members.len() + 1);
    members.push(team.lead.clone());
    members.extend(team.members.iter().cloned());

    Cluster {
        name: format!("cluster_{}", team.name),
        label: Label::new(label_lines).cell_padding(5),
        style: ClusterStyle {
            border_color: theme.team.accent.clone(),
            fill: theme.team.fill.clone(),
            pen_width: theme.team.pen_width,
            margin: theme.team.margin,
        },
        members,
        edges,
        vertical_stack: false,
    }
}

fn add_legend(graph: &mut Graph, theme: &Theme) -> Result<(), GraphError> {
    let entries = [
        (LEGEND_IDS[0], "\u{2501}\u{2501}\u{2501}  Direct reporting", None),
        (
            LEGEND_IDS[1],
            "- - -  Coordination (not direct report)",
            None,
        ),
        (
            LEGEND_IDS[2],
            "\u{25ad}  Dashed border = Vacant position",
            Some(theme.legend.muted_color.clone()),
        ),
    ];

    for (id, text, color) in &entries {
        let mut line = LabelLine::new(*text, theme.legend.entry_size);
        if let Some(color) = color {
            line = line.color(color);
        }
        graph.add_node(Node {
            id: id.to_string(),
            label: Label::new(vec![line]),
            style: NodeStyle {
                fill: theme.legend.fill.clone(),
                font_color: theme.legend.text_color.clone(),
                border_color: theme.legend.border_color.clone(),
                border: BorderStyle::Solid,
                pen_width: 1.0,
                min_width: None,
                shape: NodeShape::Plaintext,
            },
        })?;
    }

    graph.add_cluster(Cluster {
        name: "cluster_legend".to_string(),
        label: Label::new(vec![
            LabelLine::new("Legend", theme.legend.title_size).bold(),
        ]),
        style: ClusterStyle {
            border_color: theme.legend.border_color.clone(),
            fill: theme.legend.fill.clone(),
            pen_width: 1.0,
            margin: theme.legend.margin,
        },
        members: LEGEND_IDS.iter().map(|id| id.to_string()).collect(),
        edges: Vec::new(),
        vertical_stack: true,
    });
    Ok(())
}
