//! In-memory graph description handed to the rendering backend.
//!
//! Styles are explicit per node and per edge. There is no contextual default
//! state mutated between declarations; everything a node or edge looks like is
//! in the style object passed at construction time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::label::Label;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("edge references undeclared node id: {0}")]
    UndeclaredEdgeEndpoint(String),
    #[error("cluster {cluster} references undeclared node id: {node}")]
    UndeclaredClusterMember { cluster: String, node: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankDir {
    #[serde(rename = "tb")]
    TopBottom,
    #[serde(rename = "lr")]
    LeftRight,
}

impl RankDir {
    pub fn as_dot(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Splines {
    Ortho,
    Spline,
    Polyline,
}

impl Splines {
    pub fn as_dot(self) -> &'static str {
        match self {
            Self::Ortho => "ortho",
            Self::Spline => "spline",
            Self::Polyline => "polyline",
        }
    }
}

/// Global attributes applied to the whole drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphAttrs {
    pub rank_dir: RankDir,
    pub splines: Splines,
    pub node_sep: f32,
    pub rank_sep: f32,
    pub bg_color: String,
    pub pad: f32,
    pub dpi: u32,
    pub size: (f32, f32),
    pub ratio: String,
}

/// Attributes shared by every node that the per-node style does not carry:
/// font and box padding. Fixed at graph construction, never mutated after.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefaults {
    pub font_name: String,
    pub font_size: f32,
    pub margin: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Box,
    Plaintext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub fill: String,
    pub font_color: String,
    pub border_color: String,
    pub border: BorderStyle,
    pub pen_width: f32,
    pub min_width: Option<f32>,
    pub shape: NodeShape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: Label,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Invisible,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowHead {
    Vee { size: f32 },
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub color: String,
    pub pen_width: f32,
    pub line: LineStyle,
    pub arrow: ArrowHead,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStyle {
    pub border_color: String,
    pub fill: String,
    pub pen_width: f32,
    pub margin: f32,
}

/// A visually bounded grouping. Owns member *ids*; the nodes themselves live
/// in the top-level graph. `vertical_stack` is a layout hint asking the
/// backend to keep members stacked in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub name: String,
    pub label: Label,
    pub style: ClusterStyle,
    pub members: Vec<String>,
    pub edges: Vec<Edge>,
    pub vertical_stack: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub name: String,
    pub attrs: GraphAttrs,
    pub node_defaults: NodeDefaults,
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<Edge>,
    pub clusters: Vec<Cluster>,
}

impl Graph {
    pub fn new(name: impl Into<String>, attrs: GraphAttrs, node_defaults: NodeDefaults) -> Self {
        Self {
            name: name.into(),
            attrs,
            node_defaults,
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
        }
    }

    /// Declares a node. A second declaration under the same id is an error
    /// rather than a silent overwrite.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn add_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    /// Ids claimed by some cluster; their node statements are emitted inside
    /// the cluster subgraph instead of at top level.
    pub fn clustered_ids(&self) -> Vec<&str> {
        self.clusters
            .iter()
            .flat_map(|cluster| cluster.members.iter().map(String::as_str))
            .collect()
    }

    /// Checks the closure invariant: every id referenced by an edge or a
    /// cluster member list must be a declared node.
    pub fn validate(&self) -> Result<(), GraphError> {
        for edge in self.all_edges() {
            for endpoint in [&edge.from, &edge.to] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(GraphError::UndeclaredEdgeEndpoint(endpoint.clone()));
                }
            }
        }
        for cluster in &self.clusters {
            for member in &cluster.members {
                if !self.nodes.contains_key(member) {
                    return Err(GraphError::UndeclaredClusterMember {
                        cluster: cluster.name.clone(),
                        node: member.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Top-level edges followed by every cluster's edges, in declaration order.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .chain(self.clusters.iter().flat_map(|cluster| cluster.edges.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{Label, LabelLine};

    fn test_graph() -> Graph {
        Graph::new(
            "Test",
            GraphAttrs {
                rank_dir: RankDir::TopBottom,
                splines: Splines::Ortho,
                node_sep: 0.4,
                rank_sep: 0.7,
                bg_color: "white".to_string(),
                pad: 0.4,
                dpi: 300,
                size: (14.0, 18.0),
                ratio: "compress".to_string(),
            },
            NodeDefaults {
                font_name: "Helvetica".to_string(),
                font_size: 10.0,
                margin: (0.2, 0.12),
            },
        )
    }

    fn test_node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            label: Label::new(vec![LabelLine::new(id, 9.0)]),
            style: NodeStyle {
                fill: "#FFFFFF".to_string(),
                font_color: "#000000".to_string(),
                border_color: "#000000".to_string(),
                border: BorderStyle::Solid,
                pen_width: 1.5,
                min_width: None,
                shape: NodeShape::Box,
            },
        }
    }

    fn test_edge(from: &str, to: &str) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
            style: EdgeStyle {
                color: "#5B6770".to_string(),
                pen_width: 1.5,
                line: LineStyle::Solid,
                arrow: ArrowHead::Vee { size: 0.6 },
            },
        }
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut graph = test_graph();
        graph.add_node(test_node("a")).unwrap();
        assert_eq!(
            graph.add_node(test_node("a")),
            Err(GraphError::DuplicateNode("a".to_string()))
        );
    }

    #[test]
    fn validate_catches_undeclared_edge_endpoint() {
        let mut graph = test_graph();
        graph.add_node(test_node("a")).unwrap();
        graph.add_edge(test_edge("a", "ghost"));
        assert_eq!(
            graph.validate(),
            Err(GraphError::UndeclaredEdgeEndpoint("ghost".to_string()))
        );
    }

    #[test]
    fn validate_catches_undeclared_cluster_member() {
        let mut graph = test_graph();
        graph.add_node(test_node("a")).unwrap();
        graph.add_cluster(Cluster {
            name: "cluster_team".to_string(),
            label: Label::new(vec![LabelLine::new("Team", 11.0)]),
            style: ClusterStyle {
                border_color: "#C4956A".to_string(),
                fill: "#FFF8F0".to_string(),
                pen_width: 2.0,
                margin: 15.0,
            },
            members: vec!["a".to_string(), "ghost".to_string()],
            edges: Vec::new(),
            vertical_stack: false,
        });
        assert!(matches!(
            graph.validate(),
            Err(GraphError::UndeclaredClusterMember { .. })
        ));
    }

    #[test]
    fn validate_checks_cluster_edges_too() {
        let mut graph = test_graph();
        graph.add_node(test_node("lead")).unwrap();
        graph.add_cluster(Cluster {
            name: "cluster_team".to_string(),
            label: Label::new(vec![LabelLine::new("Team", 11.0)]),
            style: ClusterStyle {
                border_color: "#C4956A".to_string(),
                fill: "#FFF8F0".to_string(),
                pen_width: 2.0,
                margin: 15.0,
            },
            members: vec!["lead".to_string()],
            edges: vec![test_edge("lead", "missing")],
            vertical_stack: false,
        });
        assert_eq!(
            graph.validate(),
            Err(GraphError::UndeclaredEdgeEndpoint("missing".to_string()))
        );
    }
}
