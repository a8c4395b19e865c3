pub mod calculator;
pub mod contracts;
pub mod registry;
pub mod tool;
