#![warn(clippy::all, rust_2018_idioms)]

pub mod answer;
pub mod app;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod exercise;
pub mod field;
mod id_generator;
pub mod layout;
pub mod renderer;
pub mod ruler;
pub mod scheduler;
pub mod stage;
pub mod view;

pub use app::NumberLineApp;
pub use config::Config;
pub use controller::{StageController, StageDelays};
pub use exercise::{Exercise, Operand};
pub use layout::Layout;
pub use stage::Stage;
pub use view::{CanvasView, View};
