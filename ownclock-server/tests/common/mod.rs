#![allow(dead_code)]

pub mod mock_app;
pub mod mock_hub;
