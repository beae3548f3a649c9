//! Terminal output

pub mod printer;

pub use printer::{BufferPrinter, Printer, Printing};
