//! Command line front end: evaluates one dice expression and prints the result, its echoed input, and the trace.

use std::io::{self, Write};

use clap::Parser;
use dicetrace::{
	dice::{
		roller::{FastRand as FastRandRoller, OsRandom},
		Roller,
	},
	engine::Limits,
	Engine, Reply,
};

/// Rolls dice notation and shows every step of the reduction
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Seed for a reproducible (but not cryptographically strong) roller
	#[arg(long)]
	seed: Option<u64>,

	/// Deepest parenthesis nesting accepted
	#[arg(long, default_value_t = Limits::new().max_depth)]
	max_depth: usize,

	/// Expression to evaluate, or "supported" to list the notation. Read from stdin when omitted.
	expression: Vec<String>,
}

fn main() -> io::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let input = if args.expression.is_empty() {
		let mut lines = io::stdin().lines();

		// If there isn't already input available in stdin, display a prompt for it
		if lines.size_hint().1.is_none() {
			print!("Enter dice expression: ");
			io::stdout().flush()?;
		}

		lines.next().transpose()?.unwrap_or_default()
	} else {
		// Combining every argument lets the expression be left unquoted even with spaces
		args.expression.join(" ")
	};

	let limits = Limits::new().max_depth(args.max_depth);
	match args.seed {
		Some(seed) => run(Engine::with_limits(FastRandRoller::with_seed(seed), limits), &input),
		None => run(Engine::with_limits(OsRandom, limits), &input),
	}

	Ok(())
}

/// Responds to the input and prints the outcome.
fn run<R: Roller>(mut engine: Engine<R>, input: &str) {
	match engine.respond(input) {
		Ok(Reply::Supported(text)) => println!("{text}"),
		Ok(Reply::Rolled(evaluation)) => {
			println!("Result: {}", evaluation.title);
			println!("Input: {}", evaluation.echoed_input);
			println!("{}", evaluation.trace);
		}
		Ok(_) => {}
		Err(err) => {
			// The reason stays in the logs, players only see that the roll failed
			tracing::debug!(%err, kind = ?err.kind(), "evaluation failed");
			eprintln!("This roll could not be processed.");
			std::process::exit(1);
		}
	}
}
