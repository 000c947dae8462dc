pub mod controls;

pub use controls::{ContrastHandle, ContrastSource};
