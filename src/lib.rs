pub mod constants;
pub mod data_backend;
pub mod data_types;
pub mod dish_mapper;
pub mod errors;
pub mod order_form;
pub mod shared_main;
pub mod validation;
