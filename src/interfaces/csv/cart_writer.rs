use crate::domain::cart::{Cart, ProductId};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct CartRow<'a> {
    id: ProductId,
    title: &'a str,
    price: Decimal,
    amount: u32,
    subtotal: Decimal,
}

/// Writes the cart as CSV, one row per entry in cart order.
pub struct CartWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CartWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_cart(&mut self, cart: &Cart) -> Result<()> {
        if cart.is_empty() {
            self.writer
                .write_record(["id", "title", "price", "amount", "subtotal"])?;
        }
        for entry in cart.iter() {
            self.writer.serialize(CartRow {
                id: entry.id,
                title: &entry.title,
                price: entry.price,
                amount: entry.amount.get(),
                subtotal: entry.subtotal(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
