//! Serializes a [`Graph`] to DOT source for the Graphviz backend.
//!
//! Output is deterministic: top-level nodes are emitted in id order (the
//! graph stores them in a BTreeMap), clusters and edges in declaration order,
//! and attribute lists in a fixed sequence. Identical descriptions therefore
//! serialize byte-identically.

use crate::ir::{
    ArrowHead, BorderStyle, Cluster, Edge, Graph, LineStyle, Node, NodeShape, NodeStyle,
};

pub fn to_dot(graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(&format!("digraph {} {{\n", quote(&graph.name)));

    let attrs = &graph.attrs;
    out.push_str(&format!("  rankdir={};\n", attrs.rank_dir.as_dot()));
    out.push_str(&format!("  splines={};\n", attrs.splines.as_dot()));
    out.push_str(&format!("  nodesep={};\n", num(attrs.node_sep)));
    out.push_str(&format!("  ranksep={};\n", num(attrs.rank_sep)));
    out.push_str(&format!("  bgcolor={};\n", quote(&attrs.bg_color)));
    out.push_str(&format!("  pad={};\n", num(attrs.pad)));
    out.push_str(&format!("  dpi={};\n", attrs.dpi));
    out.push_str(&format!(
        "  size=\"{},{}\";\n",
        num(attrs.size.0),
        num(attrs.size.1)
    ));
    out.push_str(&format!("  ratio={};\n", quote(&attrs.ratio)));

    let defaults = &graph.node_defaults;
    out.push_str(&format!(
        "  node [shape=box, style=\"filled,rounded\", fontname={}, fontsize={}, margin=\"{},{}\"];\n",
        quote(&defaults.font_name),
        num(defaults.font_size),
        num(defaults.margin.0),
        num(defaults.margin.1)
    ));
    out.push('\n');

    let clustered = graph.clustered_ids();
    for node in graph.nodes.values() {
        if !clustered.contains(&node.id.as_str()) {
            out.push_str(&node_statement(node, 1));
        }
    }

    for cluster in &graph.clusters {
        out.push('\n');
        out.push_str(&cluster_statement(cluster, graph));
    }

    if !graph.edges.is_empty() {
        out.push('\n');
    }
    for edge in &graph.edges {
        out.push_str(&edge_statement(edge, 1));
    }

    out.push_str("}\n");
    out
}

fn node_statement(node: &Node, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    format!(
        "{indent}{} [label=<{}>, {}];\n",
        quote(&node.id),
        node.label.to_html(),
        node_attrs(&node.style)
    )
}

fn node_attrs(style: &NodeStyle) -> String {
    let mut attrs = vec![
        format!("fillcolor={}", quote(&style.fill)),
        format!("fontcolor={}", quote(&style.font_color)),
        format!("color={}", quote(&style.border_color)),
    ];
    match style.shape {
        NodeShape::Box => {
            if style.border == BorderStyle::Dashed {
                attrs.push("style=\"filled,rounded,dashed\"".to_string());
            }
            attrs.push(format!("penwidth={}", num(style.pen_width)));
        }
        NodeShape::Plaintext => attrs.push("shape=plaintext".to_string()),
    }
    if let Some(width) = style.min_width {
        attrs.push(format!("width={}", num(width)));
    }
    attrs.join(", ")
}

fn cluster_statement(cluster: &Cluster, graph: &Graph) -> String {
    let mut out = String::new();
    out.push_str(&format!("  subgraph {} {{\n", quote(&cluster.name)));
    out.push_str(&format!("    label=<{}>;\n", cluster.label.to_html()));
    out.push_str("    style=\"filled,rounded\";\n");
    out.push_str(&format!("    fillcolor={};\n", quote(&cluster.style.fill)));
    out.push_str(&format!(
        "    color={};\n",
        quote(&cluster.style.border_color)
    ));
    out.push_str(&format!(
        "    penwidth={};\n",
        num(cluster.style.pen_width)
    ));
    // Cluster labels do not inherit the node default font.
    out.push_str(&format!(
        "    fontname={};\n",
        quote(&graph.node_defaults.font_name)
    ));
    out.push_str(&format!("    margin={};\n", num(cluster.style.margin)));

    for member in &cluster.members {
        if let Some(node) = graph.nodes.get(member) {
            out.push_str(&node_statement(node, 2));
        }
    }
    for edge in &cluster.edges {
        out.push_str(&edge_statement(edge, 2));
    }
    if cluster.vertical_stack {
        for pair in cluster.members.windows(2) {
            out.push_str(&format!(
                "    {} -> {} [style=invis];\n",
                quote(&pair[0]),
                quote(&pair[1])
            ));
        }
    }
    out.push_str("  }\n");
    out
}

fn edge_statement(edge: &Edge, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let style = &edge.style;
    if style.line == LineStyle::Invisible {
        return format!(
            "{indent}{} -> {} [style=invis];\n",
            quote(&edge.from),
            quote(&edge.to)
        );
    }
    let line = match style.line {
        LineStyle::Solid => "solid",
        LineStyle::Dashed => "dashed",
        LineStyle::Invisible => unreachable!(),
    };
    let arrow = match &style.arrow {
        ArrowHead::Vee { size } => format!("arrowhead=vee, arrowsize={}", num(*size)),
        ArrowHead::None => "arrowhead=none".to_string(),
    };
    format!(
        "{indent}{} -> {} [style={}, color={}, penwidth={}, {}];\n",
        quote(&edge.from),
        quote(&edge.to),
        line,
        quote(&style.color),
        num(style.pen_width),
        arrow
    )
}

fn quote(input: &str) -> String {
    format!("\"{}\"", input.replace('\\', "\\\\").replace('"', "\\\""))
}

fn num(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_chart;
    use crate::config::GraphDefaults;
    use crate::org::Org;
    use crate::theme::Theme;

    fn library_dot() -> String {
        let graph = build_chart(
            Org::library(),
            &Theme::library_default(),
            &GraphDefaults::default(),
        )
        .unwrap();
        to_dot(&graph)
    }

    #[test]
    fn serialization_is_deterministic() {
        assert_eq!(library_dot(), library_dot());
    }

    #[test]
    fn global_attributes_are_emitted_once() {
        let dot = library_dot();
        assert!(dot.starts_with("digraph \"OrgChart\" {\n"));
        assert!(dot.contains("rankdir=TB;"));
        assert!(dot.contains("splines=ortho;"));
        assert!(dot.contains("nodesep=0.4;"));
        assert!(dot.contains("ranksep=0.7;"));
        assert!(dot.contains("dpi=300;"));
        assert!(dot.contains("size=\"14,18\";"));
        assert!(dot.contains("ratio=\"compress\";"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn cluster_members_are_declared_inside_the_subgraph() {
        let dot = library_dot();
        let open = dot.find("subgraph \"cluster_ri_team\"").unwrap();
        let close = dot[open..].find("}").map(|i| open + i).unwrap();
        let body = &dot[open..close];
        for id in ["karen", "linda", "cathy", "liberty", "vinaya", "ri_vacant"] {
            assert!(body.contains(&format!("\"{id}\" [label=<")), "{id}");
        }
        // members must not be re-declared at top level
        let top = &dot[..open];
        assert!(!top.contains("\"linda\" [label=<"));
    }

    #[test]
    fn clusters_carry_the_chart_font_for_their_labels() {
        let dot = library_dot();
        for name in ["cluster_ri_team", "cluster_legend"] {
            let open = dot.find(&format!("subgraph \"{name}\"")).unwrap();
            let close = dot[open..].find("}").map(|i| open + i).unwrap();
            assert!(
                dot[open..close].contains("fontname=\"Helvetica\";"),
                "{name}"
            );
        }
    }

    #[test]
    fn vertical_stack_lowers_to_invisible_edges() {
        let dot = library_dot();
        assert!(dot.contains("\"legend_report\" -> \"legend_coord\" [style=invis];"));
        assert!(dot.contains("\"legend_coord\" -> \"legend_vacant\" [style=invis];"));
    }

    #[test]
    fn report_and_coordination_edges_are_styled() {
        let dot = library_dot();
        assert!(dot.contains(
            "\"amy\" -> \"wayne\" [style=solid, color=\"#5B6770\", penwidth=1.5, arrowhead=vee, arrowsize=0.6];"
        ));
        assert!(dot.contains(
            "\"karen\" -> \"linda\" [style=dashed, color=\"#C4956A\", penwidth=1, arrowhead=none];"
        ));
    }

    #[test]
    fn vacant_node_carries_the_dashed_style() {
        let dot = library_dot();
        let line = dot
            .lines()
            .find(|line| line.trim_start().starts_with("\"law_coord\""))
            .unwrap();
        assert!(line.contains("style=\"filled,rounded,dashed\""));
        assert!(line.contains("fillcolor=\"#E8E8E8\""));
        let bil = dot
            .lines()
            .find(|line| line.trim_start().starts_with("\"bil\""))
            .unwrap();
        assert!(!bil.contains("dashed"));
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quote(r#"a"b"#), r#""a\"b""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
    }

    #[test]
    fn numbers_drop_trailing_fraction_when_integral() {
        assert_eq!(num(2.0), "2");
        assert_eq!(num(0.4), "0.4");
        assert_eq!(num(1.5), "1.5");
    }
}
