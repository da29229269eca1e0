pub mod engine;
pub mod fetch;
pub mod frame;
pub mod loading;

pub use engine::*;
pub use fetch::*;
pub use frame::*;
pub use loading::*;
