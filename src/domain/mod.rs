// Domain layer: store records, search queries and the ports the core depends on.

pub mod model;
pub mod ports;
