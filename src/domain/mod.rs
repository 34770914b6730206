// Domain layer: core models and ports (interfaces). No I/O here.

pub mod locale;
pub mod model;
pub mod ports;
pub mod timestamp;
