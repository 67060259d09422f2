//! Application module: the model behind every screen.
//!
//! `App` owns the store, the library and the playback controller, and turns
//! user actions into calls on them. Form state for the sign-up, login and
//! add-track inputs lives in `app::forms`.

mod forms;
mod model;

pub use forms::*;
pub use model::*;

#[cfg(test)]
mod tests;
