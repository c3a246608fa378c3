pub mod concatenator;
pub mod text_scanner;

pub use concatenator::{AggregateSummary, Concatenator};
pub use text_scanner::TextScanner;
