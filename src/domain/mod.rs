// Domain layer: models and ports shared by the parser, pipeline and lead sinks.

pub mod model;
pub mod ports;
