// Domain layer: grid model and the ports the controller depends on.

pub mod model;
pub mod ports;
