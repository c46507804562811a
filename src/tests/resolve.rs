use crate::{
	number::Number,
	resolve::{Expression, Node},
};

#[test]
fn parse_keeps_text() {
	let text = "(2d6+(1-(3))×(4))";
	assert_eq!(Expression::parse(text).unwrap().to_string(), text);
}

#[test]
fn parse_rejects_misplaced_parentheses() {
	assert!(Expression::parse(")(").is_none());
	assert!(Expression::parse("(1))").is_none());
	assert!(Expression::parse("((1)").is_none());
}

#[test]
fn deepest_group_first() {
	let expr = Expression::parse("(1+(2*(3))+(4))").unwrap();
	assert_eq!(expr.next_group(), Some(vec![0, 1, 1]));
	assert_eq!(expr.group_text(&[0, 1, 1]).as_deref(), Some("3"));
}

#[test]
fn left_most_on_ties() {
	let expr = Expression::parse("(1+(2*3)+(4))").unwrap();
	assert_eq!(expr.next_group(), Some(vec![0, 1]));
	assert_eq!(expr.group_text(&[0, 1]).as_deref(), Some("2*3"));
}

#[test]
fn no_groups_left() {
	assert_eq!(Expression::parse("42").unwrap().next_group(), None);
}

#[test]
fn group_text_of_non_group() {
	let expr = Expression::parse("(1+(2))").unwrap();
	assert_eq!(expr.group_text(&[0, 0]), None);
	assert_eq!(expr.group_text(&[0, 5]), None);
	assert_eq!(expr.group_text(&[0]).as_deref(), Some("1+(2)"));
}

#[test]
fn rewrites() {
	let mut expr = Expression::parse("(1+(2*3)+(4))").unwrap();

	expr.show_in_group(&[0, 1], "2 * 3".into());
	assert_eq!(expr.to_string(), "(1+(2 * 3)+(4))");

	expr.collapse_group(&[0, 1], Number::from_integer(6));
	assert_eq!(expr.to_string(), "(1+6+(4))");
	assert_eq!(expr.next_group(), Some(vec![0, 3]));

	expr.fill_group(&[0, 3], vec![Node::Group(vec![Node::Text("1+3".into())])]);
	assert_eq!(expr.to_string(), "(1+6+((1+3)))");
	assert_eq!(expr.next_group(), Some(vec![0, 3, 0]));
}

#[test]
fn collapsing_the_outer_group() {
	let mut expr = Expression::parse("(7)").unwrap();
	let path = expr.next_group().unwrap();
	expr.collapse_group(&path, Number::from_integer(7));
	assert_eq!(expr.to_string(), "7");
	assert_eq!(expr.next_group(), None);
}

#[test]
fn resolved_values_stay_exact() {
	let mut expr = Expression::parse("((2/3)*3)").unwrap();
	let two_thirds = Number::from_integer(2).checked_div(&Number::from_integer(3)).unwrap();
	expr.collapse_group(&[0, 0], two_thirds);

	assert_eq!(expr.to_string(), "(0.6666666666666666*3)");
	assert_eq!(expr.group_text(&[0]).as_deref(), Some("2⁄3*3"));
}
