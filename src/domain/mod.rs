// Domain layer: models and ports (interfaces). Concrete implementations live in adapters.

pub mod model;
pub mod ports;
