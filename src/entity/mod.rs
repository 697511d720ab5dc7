pub mod carts;
pub mod checkouts;

pub use carts::Entity as Carts;
pub use checkouts::Entity as Checkouts;
