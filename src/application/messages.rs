//! Maps operation outcomes to the messages shown to the user.

use crate::error::{CartError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

pub const ADDED: &str = "Product added to cart";
pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
pub const ADD_FAILED: &str = "Failed to add product";
pub const REMOVE_FAILED: &str = "Failed to remove product";
pub const UPDATE_FAILED: &str = "Failed to update product amount";

/// Message for a committed operation, if the operation announces success.
pub fn success_message(operation: Operation) -> Option<&'static str> {
    match operation {
        Operation::Add => Some(ADDED),
        Operation::Remove | Operation::UpdateAmount => None,
    }
}

pub fn failure_message(operation: Operation, error: &CartError) -> &'static str {
    match (operation, error.kind()) {
        (Operation::Add | Operation::UpdateAmount, ErrorKind::StockExceeded) => OUT_OF_STOCK,
        (Operation::Add, _) => ADD_FAILED,
        (Operation::Remove, _) => REMOVE_FAILED,
        (Operation::UpdateAmount, _) => UPDATE_FAILED,
    }
}
