//! Value Object Module

pub mod city;
pub mod display_name;
pub mod email;
pub mod phone_number;
pub mod user_password;
