#![allow(dead_code)]

pub mod fake_api;
pub mod roster;
pub mod show_output;
