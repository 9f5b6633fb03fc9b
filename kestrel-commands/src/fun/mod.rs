pub mod choose;
pub mod coinflip;
pub mod dice;
pub mod eightball;
pub mod joke;
pub mod love;
pub mod rps;
