// Domain layer: invocation models and the runtime port. No filesystem or process access here.

pub mod model;
pub mod ports;
