//! Query results consumed from a SPARQL endpoint.

pub mod binding;

pub use binding::{BindingKind, BindingValue, Bindings, QueryBinding, QueryResults};
