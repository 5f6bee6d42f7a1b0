//! ECS integration: the components the physics core reads and mutates, and
//! the systems that operate on them.

pub mod components;
pub mod systems;
