use crate::types::{Node, Tree};
use canopy_transform::FittedTransform;
use std::fmt::{self, Display, Formatter};

/**
Describe the tree as indented text, one line per branch direction. A branch prints `feature < split_value` followed by its left subtree and `feature >= split_value` followed by its right subtree, with each level indented by `"|   "`. A leaf appends `:` and its values to the line above it.

```text
x < 5: 2 0
x >= 5
|   y < 1.5: 0 1
|   y >= 1.5: 0 3
```
*/
impl<F> Display for Tree<F>
where
	F: FittedTransform,
{
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		enum Item {
			Node { node_index: usize, indent: String },
			Line(String),
		}
		let mut stack = vec![Item::Node {
			node_index: 0,
			indent: String::new(),
		}];
		let mut first_line = true;
		while let Some(item) = stack.pop() {
			match item {
				Item::Line(line) => {
					if !first_line {
						writeln!(f)?;
					}
					first_line = false;
					write!(f, "{}", line)?;
				}
				Item::Node { node_index, indent } => match &self.nodes[node_index] {
					Node::Leaf(leaf) => {
						write!(f, ":")?;
						for value in leaf.value.iter() {
							write!(f, " {}", format_value(*value))?;
						}
					}
					Node::Branch(branch) => {
						let feature_name = branch
							.transform
							.feature_names()
							.get(branch.feature_index)
							.map(|name| name.as_str())
							.unwrap_or("?");
						let split_value = format_value(branch.split_value);
						let child_indent = format!("{}|   ", indent);
						stack.push(Item::Node {
							node_index: branch.right_child_index,
							indent: child_indent.clone(),
						});
						stack.push(Item::Line(format!(
							"{}{} >= {}",
							indent, feature_name, split_value
						)));
						stack.push(Item::Node {
							node_index: branch.left_child_index,
							indent: child_indent,
						});
						stack.push(Item::Line(format!(
							"{}{} < {}",
							indent, feature_name, split_value
						)));
					}
				},
			}
		}
		Ok(())
	}
}

/// Format a value with at most two decimal places, without trailing zeros.
fn format_value(value: f64) -> String {
	let formatted = format!("{:.2}", value);
	let formatted = if formatted.contains('.') {
		formatted.trim_end_matches('0').trim_end_matches('.')
	} else {
		formatted.as_str()
	};
	if formatted == "-0" {
		"0".to_owned()
	} else {
		formatted.to_owned()
	}
}

#[test]
fn test_format_value() {
	assert_eq!(format_value(5.0), "5");
	assert_eq!(format_value(2.5), "2.5");
	assert_eq!(format_value(1.0 / 3.0), "0.33");
	assert_eq!(format_value(-0.001), "0");
	assert_eq!(format_value(10.0), "10");
}
