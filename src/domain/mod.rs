// Domain layer: the component request and the seams to the outside world.

pub mod model;
pub mod ports;
