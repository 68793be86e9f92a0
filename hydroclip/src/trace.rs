//! Upstream tracing in river networks.
//!
//! Every row of a network table is a directed edge from its `from` node to its `to` node. Water flows along the edges,
//! so the rows upstream of a node are the rows whose `to` node is that node, plus everything upstream of their `from`
//! nodes. Real networks contain loops (braided channels, canals), so the traversal keeps a marker per row and never
//! visits a marked row again. It also uses an explicit stack instead of recursion, as networks can be very deep.

use ahash::{HashMap, HashMapExt};
use log::debug;

use crate::error::HydroclipError;
use crate::table::AttributeTable;

/// Rows found by a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    /// One flag per table row. Set for the seed row and every row upstream of it.
    pub mask: Vec<bool>,
    /// Number of set flags.
    pub count: usize,
}

/// Cycle-safe upstream traversal over the rows of a network table.
#[derive(Debug, Clone)]
pub struct FlowNetworkTracer<'a> {
    ids: &'a [i64],
    from_nodes: &'a [i64],
    upstream: HashMap<i64, Vec<usize>>,
}

impl<'a> FlowNetworkTracer<'a> {
    /// Creates a tracer over network columns: segment ids, `from` nodes and `to` nodes. All three must have the same
    /// length.
    ///
    /// Nodes are positive integers. Zero or negative values mark a missing node (for example the `to` node of an
    /// outlet) and never connect rows.
    pub fn new(
        ids: &'a [i64],
        from_nodes: &'a [i64],
        to_nodes: &'a [i64],
    ) -> Result<Self, HydroclipError> {
        for len in [from_nodes.len(), to_nodes.len()] {
            if len != ids.len() {
                return Err(HydroclipError::LengthMismatch {
                    expected: ids.len(),
                    actual: len,
                });
            }
        }

        let mut upstream: HashMap<i64, Vec<usize>> = HashMap::new();
        for (row, to_node) in to_nodes.iter().enumerate() {
            if *to_node > 0 {
                upstream.entry(*to_node).or_default().push(row);
            }
        }

        Ok(Self {
            ids,
            from_nodes,
            upstream,
        })
    }

    /// Creates a tracer over integer columns of the table.
    pub fn from_table(
        table: &'a AttributeTable,
        id_column: &str,
        from_column: &str,
        to_column: &str,
    ) -> Result<Self, HydroclipError> {
        Self::new(
            table.integers(id_column)?,
            table.integers(from_column)?,
            table.integers(to_column)?,
        )
    }

    /// Number of rows in the network.
    pub fn row_count(&self) -> usize {
        self.ids.len()
    }

    /// Marks every row upstream of the node that is not marked yet. Returns the number of newly marked rows.
    ///
    /// `mask` holds one flag per row; rows outside of it are never marked.
    pub fn mark_upstream(&self, node: i64, mask: &mut [bool]) -> usize {
        let mut marked = 0;
        let mut stack = vec![node];

        while let Some(node) = stack.pop() {
            let Some(rows) = self.upstream.get(&node) else {
                continue;
            };

            for row in rows {
                match mask.get_mut(*row) {
                    Some(flag) if !*flag => {
                        *flag = true;
                        marked += 1;
                        if self.from_nodes[*row] > 0 {
                            stack.push(self.from_nodes[*row]);
                        }
                    }
                    _ => {}
                }
            }
        }

        marked
    }

    /// Finds the row with the given segment id and marks it together with everything upstream of its `from` node.
    ///
    /// An unknown id gives an empty trace.
    pub fn trace(&self, id: i64) -> Trace {
        let mut mask = vec![false; self.row_count()];
        let Some(seed) = self.ids.iter().position(|v| *v == id) else {
            debug!("Segment {id} is not in the network");
            return Trace { mask, count: 0 };
        };

        mask[seed] = true;
        let count = 1 + self.mark_upstream(self.from_nodes[seed], &mut mask);
        debug!("{count} rows upstream of segment {id}");

        Trace { mask, count }
    }
}
