//! The working expression and the search for the next group to resolve.

use alloc::{string::String, vec, vec::Vec};
use core::fmt::{self, Write};

use chumsky::Parser;

use crate::{number::Number, parse};

/// A piece of the working expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Node {
	/// Run of text with no parentheses in it
	Text(String),

	/// Result of a group that has been fully resolved
	Value(Number),

	/// Parenthesized group
	Group(Vec<Node>),
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Value(value) => write!(f, "{value}"),
			Self::Group(children) => {
				f.write_char('(')?;
				children.iter().try_for_each(|child| write!(f, "{child}"))?;
				f.write_char(')')
			}
		}
	}
}

impl Node {
	/// Writes the node as text to be reduced again, with values in their exact form.
	fn write_exact(&self, out: &mut impl Write) -> fmt::Result {
		match self {
			Self::Text(text) => out.write_str(text),
			Self::Value(value) => write!(out, "{}", value.exact()),
			Self::Group(children) => {
				out.write_char('(')?;
				children.iter().try_for_each(|child| child.write_exact(out))?;
				out.write_char(')')
			}
		}
	}
}

/// Expression being resolved, held as a tree of text runs and groups.
///
/// Its text form (via [`Display`](fmt::Display)) is what gets recorded in the trace after every rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
	/// Top-level nodes
	nodes: Vec<Node>,
}

impl Expression {
	/// Parses the nesting structure of an expression.
	///
	/// # Errors
	/// If the parentheses don't pair up (e.g. `)(`), `None` is returned.
	///
	/// # Examples
	/// ```
	/// use dicetrace::resolve::Expression;
	///
	/// let expr = Expression::parse("(1+(2*3))").unwrap();
	/// assert_eq!(expr.to_string(), "(1+(2*3))");
	/// assert!(Expression::parse(")1+2(").is_none());
	/// ```
	#[must_use]
	pub fn parse(text: &str) -> Option<Self> {
		match parse::expression().parse(text).into_result() {
			Ok(nodes) => Some(Self { nodes }),
			Err(errs) => {
				tracing::debug!(?errs, "expression structure failed to parse");
				None
			}
		}
	}

	/// Finds the left-most of the most deeply nested groups, returning the index path leading to it.
	/// Returns `None` once no groups remain.
	///
	/// # Examples
	/// ```
	/// use dicetrace::resolve::Expression;
	///
	/// let expr = Expression::parse("((1)+((2))+((3)))").unwrap();
	/// assert_eq!(expr.next_group(), Some(vec![0, 2, 0]));
	/// ```
	#[must_use]
	pub fn next_group(&self) -> Option<Vec<usize>> {
		deepest_group(&self.nodes, 0).map(|(_depth, mut path)| {
			path.reverse();
			path
		})
	}

	/// Gets the text inside the group at `path`. Values of groups resolved earlier are written exactly, with a
	/// [fraction slash](crate::number::FRACTION_SLASH) when they aren't integers.
	///
	/// # Examples
	/// ```
	/// use dicetrace::{number::Number, resolve::Expression};
	///
	/// let mut expr = Expression::parse("((1/3)*3)").unwrap();
	/// let third = Number::from_integer(1).checked_div(&Number::from_integer(3)).unwrap();
	/// expr.collapse_group(&[0, 0], third);
	/// assert_eq!(expr.group_text(&[0]).as_deref(), Some("1⁄3*3"));
	/// ```
	#[must_use]
	pub fn group_text(&self, path: &[usize]) -> Option<String> {
		match node(&self.nodes, path)? {
			Node::Group(children) => {
				let mut text = String::new();
				children.iter().try_for_each(|child| child.write_exact(&mut text)).ok()?;
				Some(text)
			}
			Node::Text(..) | Node::Value(..) => None,
		}
	}

	/// Replaces the contents of the group at `path`, keeping its parentheses.
	pub fn fill_group(&mut self, path: &[usize], contents: Vec<Node>) {
		if let Some(Node::Group(children)) = node_mut(&mut self.nodes, path) {
			*children = contents;
		}
	}

	/// Replaces the whole group at `path`, parentheses included, with its value.
	pub fn collapse_group(&mut self, path: &[usize], value: Number) {
		if let Some(slot) = node_mut(&mut self.nodes, path) {
			*slot = Node::Value(value);
		}
	}

	/// Replaces the contents of the group at `path` with a single run of text.
	pub fn show_in_group(&mut self, path: &[usize], text: String) {
		self.fill_group(path, vec![Node::Text(text)]);
	}
}

impl fmt::Display for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.nodes.iter().try_for_each(|node| write!(f, "{node}"))
	}
}

/// Finds the deepest group, preferring the left-most on ties.
/// The path is returned innermost index first.
fn deepest_group(nodes: &[Node], depth: usize) -> Option<(usize, Vec<usize>)> {
	let mut best: Option<(usize, Vec<usize>)> = None;

	for (idx, node) in nodes.iter().enumerate() {
		let Node::Group(children) = node else {
			continue;
		};

		let inner_depth = depth.saturating_add(1);
		let (found_depth, mut path) = deepest_group(children, inner_depth).unwrap_or((inner_depth, Vec::new()));
		if best.as_ref().map_or(true, |(best_depth, _)| found_depth > *best_depth) {
			path.push(idx);
			best = Some((found_depth, path));
		}
	}

	best
}

/// Walks an index path down the tree.
fn node<'a>(nodes: &'a [Node], path: &[usize]) -> Option<&'a Node> {
	let (&first, rest) = path.split_first()?;
	match (nodes.get(first)?, rest.is_empty()) {
		(found, true) => Some(found),
		(Node::Group(children), false) => node(children, rest),
		(Node::Text(..) | Node::Value(..), false) => None,
	}
}

/// Walks an index path down the tree, mutably.
fn node_mut<'a>(nodes: &'a mut [Node], path: &[usize]) -> Option<&'a mut Node> {
	let (&first, rest) = path.split_first()?;
	match (nodes.get_mut(first)?, rest.is_empty()) {
		(found, true) => Some(found),
		(Node::Group(children), false) => node_mut(children, rest),
		(Node::Text(..) | Node::Value(..), false) => None,
	}
}
