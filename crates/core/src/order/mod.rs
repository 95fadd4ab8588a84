mod builder;
mod order_type;
mod side;

pub use builder::{OrderConfiguration, OrderRequest, build_order, new_client_order_id};
pub use order_type::OrderType;
pub use side::Side;
