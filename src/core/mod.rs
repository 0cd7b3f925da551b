pub mod dimensions;
pub mod materials;
pub mod model;
