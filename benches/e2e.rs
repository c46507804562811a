#![feature(test)]

extern crate test;

use test::Bencher;

use dicetrace::{dice::roller::FastRand, Engine};

#[bench]
fn e2e_basic(b: &mut Bencher) {
	let mut engine = Engine::new(FastRand::default());
	b.iter(|| engine.evaluate("4d8 + 4").unwrap());
}

#[bench]
fn e2e_complex(b: &mut Bencher) {
	let mut engine = Engine::new(FastRand::default());
	b.iter(|| engine.evaluate("4d8 + 2d10 * (-3d6 - 6 / (2 + d4)) × d%").unwrap());
}

#[bench]
fn e2e_deep(b: &mut Bencher) {
	let input = format!("{}d20{}", "(1+".repeat(100), ")".repeat(100));
	let mut engine = Engine::new(FastRand::default());
	b.iter(|| engine.evaluate(&input).unwrap());
}

#[bench]
fn e2e_huge(b: &mut Bencher) {
	let mut engine = Engine::new(FastRand::default());
	b.iter(|| engine.evaluate("65536d6").unwrap());
}
