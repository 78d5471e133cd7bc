pub mod customer;
pub mod price;
pub mod price_class;
pub mod stock;
