//! Three-tier flow graphs for sankey diagrams

use dash_records::{Label, Record, RecordField};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Weighted link between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowEdge {
    /// Absolute index of the source node
    pub source: usize,
    /// Absolute index of the target node
    pub target: usize,
    /// Number of co-occurring records
    pub weight: u64,
}

/// Node list and edges of a three-stage flow
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    /// Stage 1 values, then stage 2, then stage 3
    pub nodes: Vec<Label>,
    /// Index of the first node of each stage
    pub stage_offsets: [usize; 3],
    /// Stage 1→2 edges followed by stage 2→3 edges
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Whether the diagram should be drawn
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.edges.iter().any(|e| e.weight > 0)
    }

    /// Node labels of one stage (0, 1 or 2)
    #[must_use]
    pub fn stage(&self, stage: usize) -> &[Label] {
        let start = self.stage_offsets.get(stage).copied().unwrap_or(self.nodes.len());
        let end = self
            .stage_offsets
            .get(stage + 1)
            .copied()
            .unwrap_or(self.nodes.len());
        &self.nodes[start..end]
    }

    /// Edge weight between two node labels
    #[must_use]
    pub fn weight_between(&self, source: &Label, target: &Label) -> Option<u64> {
        self.edges
            .iter()
            .find(|e| &self.nodes[e.source] == source && &self.nodes[e.target] == target)
            .map(|e| e.weight)
    }
}

fn distinct(records: &[Record], field: RecordField) -> IndexSet<Label> {
    records.iter().filter_map(|r| r.label(field)).collect()
}

fn link_counts(
    records: &[Record],
    (from_field, from): (RecordField, &IndexSet<Label>),
    (to_field, to): (RecordField, &IndexSet<Label>),
    offsets: (usize, usize),
) -> Vec<FlowEdge> {
    let mut counts: BTreeMap<(usize, usize), u64> = BTreeMap::new();
    for record in records {
        let (Some(a), Some(b)) = (record.label(from_field), record.label(to_field)) else {
            continue;
        };
        if let (Some(i), Some(j)) = (from.get_index_of(&a), to.get_index_of(&b)) {
            *counts.entry((offsets.0 + i, offsets.1 + j)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|((source, target), weight)| FlowEdge {
            source,
            target,
            weight,
        })
        .collect()
}

/// Build the stage1 → stage2 → stage3 co-occurrence graph
///
/// Each stage contributes its distinct non-empty values in encounter order.
/// A value appearing in two stages becomes two nodes.
#[must_use]
pub fn flow_graph(
    records: &[Record],
    stage1: RecordField,
    stage2: RecordField,
    stage3: RecordField,
) -> FlowGraph {
    let first = distinct(records, stage1);
    let second = distinct(records, stage2);
    let third = distinct(records, stage3);

    let stage_offsets = [0, first.len(), first.len() + second.len()];

    let mut edges = link_counts(
        records,
        (stage1, &first),
        (stage2, &second),
        (stage_offsets[0], stage_offsets[1]),
    );
    edges.extend(link_counts(
        records,
        (stage2, &second),
        (stage3, &third),
        (stage_offsets[1], stage_offsets[2]),
    ));

    let nodes = first.into_iter().chain(second).chain(third).collect();

    FlowGraph {
        nodes,
        stage_offsets,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(topic: &str, sector: &str, region: &str) -> Record {
        Record {
            topic: topic.into(),
            sector: sector.into(),
            region: region.into(),
            ..Record::default()
        }
    }

    fn tsr(records: &[Record]) -> FlowGraph {
        flow_graph(records, RecordField::Topic, RecordField::Sector, RecordField::Region)
    }

    #[test]
    fn builds_offset_nodes_and_counted_edges() {
        let records = vec![
            rec("oil", "Energy", "Asia"),
            rec("oil", "Energy", "Europe"),
            rec("gas", "Energy", "Asia"),
            rec("gas", "Retail", "Asia"),
        ];
        let graph = tsr(&records);

        assert_eq!(
            graph.nodes,
            vec![
                Label::text("oil"),
                Label::text("gas"),
                Label::text("Energy"),
                Label::text("Retail"),
                Label::text("Asia"),
                Label::text("Europe"),
            ]
        );
        assert_eq!(graph.stage_offsets, [0, 2, 4]);
        assert_eq!(
            graph.edges,
            vec![
                FlowEdge { source: 0, target: 2, weight: 2 },
                FlowEdge { source: 1, target: 2, weight: 1 },
                FlowEdge { source: 1, target: 3, weight: 1 },
                FlowEdge { source: 2, target: 4, weight: 2 },
                FlowEdge { source: 2, target: 5, weight: 1 },
                FlowEdge { source: 3, target: 4, weight: 1 },
            ]
        );
        assert!(graph.is_valid());
    }

    #[test]
    fn empty_values_break_links() {
        let records = vec![rec("oil", "", "Asia"), rec("", "Energy", "Asia")];
        let graph = tsr(&records);

        assert_eq!(graph.stage(0), &[Label::text("oil")]);
        assert_eq!(graph.stage(1), &[Label::text("Energy")]);
        assert_eq!(graph.stage(2), &[Label::text("Asia")]);
        assert_eq!(graph.edges, vec![FlowEdge { source: 1, target: 2, weight: 1 }]);
    }

    #[test]
    fn shared_value_across_stages_gets_two_nodes() {
        let records = vec![rec("Energy", "Energy", "World")];
        let graph = tsr(&records);

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.weight_between(&Label::text("Energy"), &Label::text("World")), Some(1));
        assert_eq!(graph.edges[0], FlowEdge { source: 0, target: 1, weight: 1 });
    }

    #[test]
    fn no_edges_is_invalid() {
        let records = vec![rec("oil", "", ""), rec("", "", "Asia")];
        let graph = tsr(&records);

        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges.is_empty());
        assert!(!graph.is_valid());
    }

    #[test]
    fn empty_input_is_invalid() {
        let graph = tsr(&[]);
        assert!(graph.nodes.is_empty());
        assert!(!graph.is_valid());
        assert!(graph.stage(1).is_empty());
    }
}
