pub mod dish_client;
pub mod mutation;

pub use dish_client::{ClientConfig, DishClient, DishSubmitter};
pub use mutation::DishMutation;
