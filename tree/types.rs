/// Whether the leaves of a tree hold class counts or a mean value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
	Classification { n_classes: usize },
	Regression,
}

impl Task {
	/// The length of every leaf value and prediction.
	pub fn n_outputs(&self) -> usize {
		match self {
			Task::Classification { n_classes } => *n_classes,
			Task::Regression => 1,
		}
	}
}

/// Trees are stored as a `Vec` of `Node`s. Each branch in the tree has two indexes into the `Vec`, one for each of its children. The root is the node at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<F> {
	pub task: Task,
	/// The names of the features the tree was trained on.
	pub feature_names: Vec<String>,
	pub nodes: Vec<Node<F>>,
}

/// A node is either a branch or a leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<F> {
	Branch(BranchNode<F>),
	Leaf(LeafNode),
}

/// A `BranchNode` is a branch in a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode<F> {
	/// This is the index in the tree's node vector for this node's left child.
	pub left_child_index: usize,
	/// This is the index in the tree's node vector for this node's right child.
	pub right_child_index: usize,
	/// This is the transform fit to the examples that reached this node during training. An example is transformed with it before its value for `feature_index` is compared with `split_value`.
	pub transform: F,
	/// This is the index of the transformed feature to get the value for.
	pub feature_index: usize,
	/// Examples whose transformed value is < `split_value` are sent left, and all others are sent right.
	pub split_value: f64,
}

/// The leaves in a tree hold the values to accumulate for examples that get sent to them.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
	/// For classification, this is the count of training examples of each class that reached the leaf. For regression, this is a single value, the mean label of those examples.
	pub value: Vec<f64>,
}

impl<F> Tree<F> {
	pub fn n_nodes(&self) -> usize {
		self.nodes.len()
	}

	pub fn n_leaves(&self) -> usize {
		self.nodes
			.iter()
			.filter(|node| matches!(node, Node::Leaf(_)))
			.count()
	}

	/// The number of branches on the longest path from the root to a leaf.
	pub fn depth(&self) -> usize {
		let mut max_depth = 0;
		let mut stack = vec![(0, 0)];
		while let Some((node_index, depth)) = stack.pop() {
			match self.nodes.get(node_index) {
				Some(Node::Branch(branch)) => {
					stack.push((branch.left_child_index, depth + 1));
					stack.push((branch.right_child_index, depth + 1));
				}
				Some(Node::Leaf(_)) => max_depth = max_depth.max(depth),
				None => {}
			}
		}
		max_depth
	}
}

impl<F> Node<F> {
	pub fn as_branch(&self) -> Option<&BranchNode<F>> {
		match self {
			Node::Branch(branch) => Some(branch),
			_ => None,
		}
	}

	pub fn as_leaf(&self) -> Option<&LeafNode> {
		match self {
			Node::Leaf(leaf) => Some(leaf),
			_ => None,
		}
	}
}
