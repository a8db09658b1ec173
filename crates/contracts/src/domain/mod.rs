pub mod common;

pub mod a001_product;
pub mod a002_order;
pub mod a003_return_request;
pub mod a004_user;
pub mod a005_inventory;
pub mod a006_supplier;
