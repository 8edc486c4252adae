pub mod command;
pub mod compute;
pub mod entities;
pub mod field;
pub mod score;
pub mod snapshot;
