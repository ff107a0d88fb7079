pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod markup;
pub mod models;
pub mod state;
pub mod storage;

pub use client::{HttpLikeClient, LikeEndpoint};
pub use config::Config;
pub use controller::{ClickOutcome, ControllerOptions, LikeToggleController};
pub use errors::{PageError, ToggleError};
pub use state::PageState;
pub use storage::load_page;
