// Domain layer: core models and ports. No dependencies beyond std/serde/uuid.

pub mod model;
pub mod ports;
