// src/utils/mod.rs

pub mod flash;
pub mod hash;
pub mod html;
pub mod session;
