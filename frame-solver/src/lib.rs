//! Frame Solver - A native Rust 2D frame/beam analysis library
//!
//! This library provides linear-elastic static analysis of planar
//! skeletal structures using the direct stiffness method, supporting:
//! - Frame members with end releases and hinged nodes
//! - Skewed, elastic (spring) and displaced supports
//! - Nodal forces, linearly varying member loads and thermal loads
//! - Multiple load cases sharing one stiffness matrix
//! - Internal force and displacement diagrams with extrema
//!
//! ## Example
//! ```rust
//! use frame_solver::prelude::*;
//!
//! let mut model = StructureModel::new();
//!
//! // Add material and section
//! let steel = model.add_material(Material::steel());
//! let section = model.add_section(Section::rectangle(0.3, 0.5));
//!
//! // Add nodes
//! let n1 = model.add_node(0.0, 0.0).unwrap();
//! let n2 = model.add_node(10.0, 0.0).unwrap();
//!
//! // Add member
//! let beam = model.add_member(n1, n2, steel, section).unwrap();
//!
//! // Add supports
//! model.set_support(n1, Support::pinned()).unwrap();
//! model.set_support(n2, Support::roller_y()).unwrap();
//!
//! // Add loads
//! let dead = model.load_case_id("Case 1").unwrap();
//! model
//!     .set_distributed_load(beam, dead, DistributedLoad::uniform_local(-10.0))
//!     .unwrap();
//!
//! // Analyze
//! model.analyze().unwrap();
//!
//! // Get results
//! let reaction = model.node_reactions(n1, dead).unwrap();
//! assert!((reaction.fy - 50.0).abs() < 1e-6);
//! let diagram = model.member_diagram(beam, dead).unwrap();
//! assert!(diagram.moment_max[0].is_some());
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod extract;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::elements::{Material, Member, MemberHinges, Node, Section, Support};
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::extract::ModelData;
    pub use crate::loads::{
        DistributedLoad, LoadAxes, LoadCase, LoadCaseId, NodalForce, Temperature,
    };
    pub use crate::math::HingeCase;
    pub use crate::model::StructureModel;
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, DiagramField, LoadCaseResults, MemberDiagram,
        MemberEndForces, MemberForces, NodeDisplacement, Reactions,
    };
}
