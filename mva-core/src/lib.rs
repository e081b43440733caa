pub mod calculations;
pub mod models;
pub mod view_model;

pub use calculations::project;
pub use models::*;
pub use view_model::{ViewModel, ViewModelOptions};
