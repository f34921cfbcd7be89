// Application layer: console front end and the menu flow built on the core.

pub mod console;
pub mod display;
pub mod menu;
pub mod scripted;
