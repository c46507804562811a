#![feature(test)]

extern crate test;

use test::Bencher;

use dicetrace::{resolve::Expression, token};

#[bench]
fn tokenize_basic(b: &mut Bencher) {
	b.iter(|| token::tokenize("4d8+4").unwrap());
}

#[bench]
fn tokenize_complex(b: &mut Bencher) {
	b.iter(|| token::tokenize("4d8+2d10*-3d6-6÷2×d%+d‱").unwrap());
}

#[bench]
fn structure_nested(b: &mut Bencher) {
	let input = format!("({}1{})", "(2*".repeat(100), ")".repeat(100));
	b.iter(|| Expression::parse(&input).unwrap().next_group());
}
