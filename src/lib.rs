#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod color;
pub mod combination;
pub mod config;
pub mod controller;
pub mod coord;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod hold;
pub mod layout;
pub mod piece;
pub mod premove;
