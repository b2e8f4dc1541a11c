use crate::segment::{SegmentMap, Timestamp};
use std::collections::HashMap;

/// Identifies a segment across the whole library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentId {
    /// Index of the transcript in load order.
    pub transcript: usize,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone)]
struct Node {
    id: SegmentId,
    text: String,
    edges: Vec<usize>,
}

/// Sequential adjacency over segments.
///
/// Every segment becomes a node carrying its text. Consecutive segments of
/// the same transcript are joined by an undirected edge; transcripts are
/// never linked to each other.
#[derive(Debug, Clone, Default)]
pub struct ConversationGraph {
    nodes: Vec<Node>,
    index: HashMap<SegmentId, usize>,
}

impl ConversationGraph {
    /// Build the graph from per-transcript segment maps in load order.
    pub fn build(maps: &[SegmentMap]) -> Self {
        let mut graph = Self::default();
        for (transcript, map) in maps.iter().enumerate() {
            let mut previous: Option<usize> = None;
            for (timestamp, text) in map {
                let id = SegmentId {
                    transcript,
                    timestamp: timestamp.clone(),
                };
                let node = graph.nodes.len();
                graph.nodes.push(Node {
                    id: id.clone(),
                    text: text.clone(),
                    edges: Vec::new(),
                });
                graph.index.insert(id, node);
                if let Some(prev) = previous {
                    graph.nodes[prev].edges.push(node);
                    graph.nodes[node].edges.push(prev);
                }
                previous = Some(node);
            }
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Text stored for `id`, if the segment exists.
    pub fn text(&self, id: &SegmentId) -> Option<&str> {
        self.index.get(id).map(|&i| self.nodes[i].text.as_str())
    }

    /// Segments directly adjacent to `id`.
    pub fn neighbors(&self, id: &SegmentId) -> Vec<&SegmentId> {
        self.index
            .get(id)
            .map(|&i| self.nodes[i].edges.iter().map(|&j| &self.nodes[j].id).collect())
            .unwrap_or_default()
    }

    /// Texts within `window` hops of `id`, in document order.
    ///
    /// A window of zero returns only the segment itself. Unknown ids yield an
    /// empty list.
    pub fn context_window(&self, id: &SegmentId, window: usize) -> Vec<&str> {
        let Some(&center) = self.index.get(id) else {
            return Vec::new();
        };
        // nodes of one transcript are stored contiguously in document order
        let same = |i: usize| self.nodes[i].id.transcript == id.transcript;
        let mut start = center;
        for _ in 0..window {
            match start.checked_sub(1) {
                Some(prev) if same(prev) && self.nodes[prev].edges.contains(&start) => {
                    start = prev
                }
                _ => break,
            }
        }
        let mut end = center;
        for _ in 0..window {
            let next = end + 1;
            if next < self.nodes.len() && same(next) && self.nodes[end].edges.contains(&next) {
                end = next;
            } else {
                break;
            }
        }
        self.nodes[start..=end]
            .iter()
            .map(|n| n.text.as_str())
            .collect()
    }
}
