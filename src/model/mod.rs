pub mod display;
pub mod entry;
pub mod gloss;
pub mod token;
