#![feature(test)]

extern crate test;

use test::Bencher;

use dicetrace::dice::{
	roller::{unbiased_face, FastRand, OsRandom, Roller},
	Dice,
};

#[bench]
fn roll_4d8(b: &mut Bencher) {
	let dice = Dice::new(4, 8);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap());
}

#[bench]
fn roll_100d20(b: &mut Bencher) {
	let dice = Dice::new(100, 20);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap());
}

#[bench]
fn roll_max_dice(b: &mut Bencher) {
	let dice = Dice::new(65536, 65536);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap());
}

#[bench]
fn roll_100d6_os(b: &mut Bencher) {
	let dice = Dice::new(100, 6);
	b.iter(|| OsRandom.roll(&dice).unwrap());
}

#[bench]
fn roll_and_total_4d8(b: &mut Bencher) {
	let dice = Dice::new(4, 8);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap().total());
}

#[bench]
fn unbiased_face_d6(b: &mut Bencher) {
	let mut draw = 0_u16;
	b.iter(|| {
		draw = draw.wrapping_add(7919);
		unbiased_face(6, || draw)
	});
}
