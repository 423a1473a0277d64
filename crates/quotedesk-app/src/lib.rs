// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod input;
pub mod model;
pub mod repository;
pub mod session;
pub mod state;
#[cfg(test)]
mod test_support;

pub use ids::*;
pub use input::*;
pub use model::*;
pub use repository::*;
pub use session::*;
pub use state::*;
