//! Flowchart rendering for autoresponder definitions.
//!
//! Rendering is split in two passes: [`DiagramBuilder`] walks the step
//! graph and collects typed node and edge records, and [`DiagramBuilder::render`]
//! turns those records into mermaid `graph TD` text. The split keeps
//! traversal order and label formatting testable without parsing the
//! rendered output.

use crate::flow::{Autoresponder, HumanTime, Outcome, Step, StepKind};
use ahash::AHashMap;
use itertools::Itertools;
use std::fmt::Write;

/// Shape a step renders as, determined by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// `send email` and `unsubscribe` steps.
    Rectangle,
    /// Tag choice steps.
    Diamond,
    /// Wait steps.
    Flag,
}

impl NodeShape {
    pub fn for_kind(kind: StepKind) -> Self {
        match kind {
            StepKind::SendEmail | StepKind::Unsubscribe => NodeShape::Rectangle,
            StepKind::Choice => NodeShape::Diamond,
            StepKind::Wait => NodeShape::Flag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    pub shape: NodeShape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeLabel {
    /// A sequential transition with its delay in milliseconds.
    Delay(u64),
    /// A tag-check branch.
    Branch(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    pub label: EdgeLabel,
}

/// Collects the nodes and edges of an autoresponder in a deterministic
/// order: steps in insertion order, each step's transitions in the fixed
/// order next, yes, no.
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
}

impl DiagramBuilder {
    pub fn from_autoresponder(autoresponder: &Autoresponder) -> Self {
        let ids: AHashMap<&str, String> = autoresponder
            .steps
            .keys()
            .map(|name| (name.as_str(), node_id(name)))
            .collect();

        // Nodes appear in first-seen order over step names and their
        // transition targets, which is the order a reader encounters them
        // following the flow from the top.
        let nodes = autoresponder
            .steps
            .iter()
            .flat_map(|(name, step)| std::iter::once(name.as_str()).chain(step.successors()))
            .unique()
            .filter_map(|name| {
                let step = autoresponder.step(name)?;
                Some(DiagramNode {
                    id: ids[name].clone(),
                    label: name.to_string(),
                    shape: NodeShape::for_kind(step.kind()),
                })
            })
            .collect();

        let mut edges = Vec::new();
        for (name, step) in &autoresponder.steps {
            let from = &ids[name.as_str()];
            match step {
                Step::SendEmail {
                    next_action,
                    run_next_in,
                    ..
                }
                | Step::Wait {
                    next_action,
                    run_next_in,
                    ..
                } => {
                    // A next action without a delay is half-wired and has
                    // no meaningful label, so it draws no edge.
                    if let (Some(next), Some(delay)) = (next_action, run_next_in) {
                        edges.push(DiagramEdge {
                            from: from.clone(),
                            to: node_id(next),
                            label: EdgeLabel::Delay(*delay),
                        });
                    }
                }
                Step::Choice {
                    yes_action,
                    no_action,
                    ..
                } => {
                    for (outcome, target) in
                        [(Outcome::Yes, yes_action), (Outcome::No, no_action)]
                    {
                        if let Some(target) = target {
                            edges.push(DiagramEdge {
                                from: from.clone(),
                                to: node_id(target),
                                label: EdgeLabel::Branch(outcome),
                            });
                        }
                    }
                }
                Step::Unsubscribe { .. } => {}
            }
        }

        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    /// Renders the collected records as mermaid `graph TD` text.
    pub fn render(&self) -> String {
        let mut output = String::from("graph TD\n");
        output.push_str("classDef label font-family:sans-serif,font-size:0.85em;\n");
        for node in &self.nodes {
            let label = escape_label(&node.label);
            match node.shape {
                NodeShape::Rectangle => writeln!(output, "{}[\"{}\"]", node.id, label),
                NodeShape::Diamond => writeln!(output, "{}{{\"{}\"}}", node.id, label),
                NodeShape::Flag => writeln!(output, "{}>\"{}\"]", node.id, label),
            }
            .unwrap();
        }
        for edge in &self.edges {
            let label = match &edge.label {
                EdgeLabel::Delay(millis) => {
                    format!("Wait {}", HumanTime::from_millis(*millis))
                }
                EdgeLabel::Branch(outcome) => outcome.to_string(),
            };
            writeln!(output, "{}-->|{}|{}", edge.from, label, edge.to).unwrap();
        }
        output
    }
}

/// Renders an autoresponder straight to diagram text.
pub fn to_diagram_text(autoresponder: &Autoresponder) -> String {
    DiagramBuilder::from_autoresponder(autoresponder).render()
}

/// Node ids are step names with whitespace removed.
fn node_id(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Mermaid treats double quotes as label delimiters, so they are encoded.
fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;")
}
