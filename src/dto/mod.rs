pub mod admin_dto;
pub mod auth_dto;
pub mod car_dto;
pub mod common;
pub mod customer_dto;
pub mod parking_dto;
