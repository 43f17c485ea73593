//! Structural elements module

mod constraint;
mod dof;
mod node;
mod shell;

pub use constraint::Constraint;
pub use dof::{
    DofNumbers, DofSlot, ElementId, NodeId, DOFS_PER_ELEMENT, DOFS_PER_NODE, NODES_PER_ELEMENT,
};
pub use node::Node;
pub use shell::{ShellElement, ShellFormulation, ShellSection};
