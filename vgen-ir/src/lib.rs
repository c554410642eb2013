//! The in-memory representation of an elaborated hardware netlist: the
//! closed set of primitives it can be built from, the nets that
//! instantiate them, and a validated, ascending-id-ordered netlist type.
mod net;
mod netlist;
mod primitive;

pub use net::{InstId, Net, NetInput};
pub use netlist::Netlist;
pub use primitive::{DisplayArg, DisplayArgsBuilder, Primitive, Signal, Width};
