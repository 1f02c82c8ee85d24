//! Bijection between (node id, device id) and rows/columns of the MNA
//! system.

const INVALID: usize = usize::MAX;

/// Maps every non-ground node and every voltage-defined (or sample-branch)
/// device to a row of the MNA matrix. The ground node and every other
/// device map to nothing.
#[derive(Debug, Clone)]
pub struct IndexMap {
    node_rows: Vec<usize>,
    dev_rows: Vec<usize>,
    dimension: usize,
}

impl IndexMap {
    /// Builds the map by walking nodes in id order (skipping ground), then
    /// devices in id order, assigning the next free row to each branch
    /// device encountered.
    pub fn build(node_count: usize, ground: usize, branch_devices: &[usize]) -> Self {
        let mut node_rows = vec![INVALID; node_count];
        let mut next = 0;
        for (id, row) in node_rows.iter_mut().enumerate() {
            if id == ground {
                continue;
            }
            *row = next;
            next += 1;
        }

        let dev_count = branch_devices.iter().copied().max().map_or(0, |m| m + 1);
        let mut dev_rows = vec![INVALID; dev_count];
        for &dev_id in branch_devices {
            dev_rows[dev_id] = next;
            next += 1;
        }

        IndexMap {
            node_rows,
            dev_rows,
            dimension: next,
        }
    }

    pub fn node_row(&self, node_id: usize) -> Option<usize> {
        self.node_rows
            .get(node_id)
            .copied()
            .filter(|&r| r != INVALID)
    }

    pub fn dev_row(&self, device_id: usize) -> Option<usize> {
        self.dev_rows
            .get(device_id)
            .copied()
            .filter(|&r| r != INVALID)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_node_has_no_row() {
        let map = IndexMap::build(3, 0, &[]);
        assert_eq!(map.node_row(0), None);
        assert!(map.node_row(1).is_some());
        assert!(map.node_row(2).is_some());
        assert_eq!(map.dimension(), 2);
    }

    #[test]
    fn branch_devices_get_trailing_rows() {
        let map = IndexMap::build(3, 0, &[5]);
        assert_eq!(map.dimension(), 3);
        assert_eq!(map.dev_row(5), Some(2));
        assert_eq!(map.dev_row(1), None);
    }

    #[test]
    fn image_is_dense_0_to_d() {
        let map = IndexMap::build(4, 2, &[0, 3]);
        let mut seen = vec![false; map.dimension()];
        for id in 0..4 {
            if let Some(r) = map.node_row(id) {
                seen[r] = true;
            }
        }
        for &id in &[0usize, 3] {
            if let Some(r) = map.dev_row(id) {
                seen[r] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}
