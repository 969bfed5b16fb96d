//! UI screens.

mod app;
pub mod directory_screen;

pub use app::App;
pub use directory_screen::{
    DirectoryFocus, DirectoryKeyResult, DirectoryScreen, DirectoryScreenState,
};
