// Domain layer: records, sort directives and the ports adapters implement.

pub mod model;
pub mod ports;
