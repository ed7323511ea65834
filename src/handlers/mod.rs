pub mod bindings;
pub mod echo;
pub mod invoke;
pub mod pubsub;
pub mod status;
