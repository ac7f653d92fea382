mod adapter;
mod enums;
mod gl46;
mod libgl;
mod types;

pub use adapter::Adapter;
pub use enums::*;
pub use gl46::Api;
pub use types::*;
