mod create_product;
mod health;

pub use create_product::create_product;
pub use health::health;
