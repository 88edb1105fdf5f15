// Pure simulation systems invoked by the hall loop.

pub mod economy;
pub mod wandering;
