//! Domain model: cart entries, product metadata and the ports the engine
//! talks to.

pub mod cart;
pub mod ports;
pub mod product;
