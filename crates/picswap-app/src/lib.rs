//! Terminal front end for picture swap puzzles.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod app;
mod async_work;
pub mod command;
pub mod export;
pub mod render;
pub mod settings;

pub use self::{
    app::{AppError, PicswapApp},
    async_work::WorkError,
    settings::{Cli, Settings},
};
