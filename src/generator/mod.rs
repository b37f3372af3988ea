mod bounds;
mod generator;

pub use bounds::Bounds;
pub use generator::Generator;
