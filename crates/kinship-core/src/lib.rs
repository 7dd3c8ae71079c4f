//! Kinship Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Kinship parser,
//! layout and renderer. It includes:
//!
//! - **Nodes**: The relationship node model ([`node::RelationshipNode`])
//! - **Tree**: The owned working set of nodes ([`tree::FamilyTree`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)

pub mod color;
pub mod geometry;
pub mod node;
pub mod tree;
