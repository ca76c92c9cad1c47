//! Pure data structures: catalog products, stock records, and the cart itself.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
