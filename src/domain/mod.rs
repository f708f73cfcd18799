// Domain layer: display models and the score-service port.

pub mod model;
pub mod ports;
