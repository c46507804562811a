mod dice;
mod expr;
mod resolve;
