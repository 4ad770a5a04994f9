/// A node of the search tree recorded during one iterative-deepening round.
///
/// The tree is only kept to order moves in the next, deeper round: branches
/// are sorted by descending child value and explored in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchNode {
    value: i32,
    branches: Vec<Branch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub column: usize,
    pub node: SearchNode,
}

impl SearchNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Insert a child, keeping branches sorted by descending value. A child
    /// whose value ties existing branches goes after them.
    pub fn insert(&mut self, column: usize, node: SearchNode) {
        let pos = self
            .branches
            .partition_point(|b| b.node.value >= node.value);
        self.branches.insert(pos, Branch { column, node });
    }

    /// Columns of the direct children in exploration order.
    #[cfg(test)]
    pub fn ordering(&self) -> Vec<usize> {
        self.branches.iter().map(|b| b.column).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> SearchNode {
        let mut node = SearchNode::new();
        node.set_value(value);
        node
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut root = SearchNode::new();
        root.insert(0, leaf(3));
        root.insert(1, leaf(10));
        root.insert(2, leaf(-4));
        root.insert(3, leaf(7));
        assert_eq!(root.ordering(), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut root = SearchNode::new();
        root.insert(4, leaf(1));
        root.insert(2, leaf(1));
        root.insert(6, leaf(5));
        root.insert(0, leaf(1));
        assert_eq!(root.ordering(), vec![6, 4, 2, 0]);
    }
}
