mod token_cell;

pub use token_cell::TokenCell;
