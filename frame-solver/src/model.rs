//! Structure model - the container the analysis engine reads from

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::{self, AnalysisOptions};
use crate::elements::{Material, Member, MemberHinges, Node, Section, Support};
use crate::error::{FrameError, FrameResult};
use crate::extract::ModelData;
use crate::loads::{DistributedLoad, LoadCase, LoadCaseId, NodalForce, Temperature};
use crate::results::{
    AnalysisResults, AnalysisSummary, LoadCaseResults, MemberDiagram, MemberEndForces,
    NodeDisplacement, Reactions,
};

/// Distance below which two nodes are considered coincident
pub const NODE_TOLERANCE: f64 = 1e-5;

/// The main 2D frame model
///
/// Entities live in arena vectors and refer to each other by index. Every
/// node and member carries one load entry per load case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureModel {
    /// Nodes in the model
    pub nodes: Vec<Node>,
    /// Members in the model
    pub members: Vec<Member>,
    /// Materials in the model
    pub materials: Vec<Material>,
    /// Sections in the model
    pub sections: Vec<Section>,
    /// Load cases in solve order
    pub load_cases: Vec<LoadCase>,

    /// Results of the last successful analysis
    #[serde(skip)]
    results: Option<AnalysisResults>,
}

impl Default for StructureModel {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureModel {
    /// Create a new empty model with a single default load case
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            members: Vec::new(),
            materials: Vec::new(),
            sections: Vec::new(),
            load_cases: vec![LoadCase::default()],
            results: None,
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a material, returning its index
    pub fn add_material(&mut self, material: Material) -> usize {
        self.results = None;
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add a section, returning its index
    pub fn add_section(&mut self, section: Section) -> usize {
        self.results = None;
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Add a node, returning its index
    pub fn add_node(&mut self, x: f64, y: f64) -> FrameResult<usize> {
        if !x.is_finite() || !y.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "Node coordinates must be finite: ({}, {})",
                x, y
            )));
        }
        if self.nodes.iter().any(|n| n.is_at(x, y, NODE_TOLERANCE)) {
            return Err(FrameError::DuplicateNode { x, y });
        }

        let mut node = Node::new(x, y);
        node.forces = vec![NodalForce::default(); self.load_cases.len()];
        self.nodes.push(node);
        self.results = None;
        Ok(self.nodes.len() - 1)
    }

    /// Add a member between two nodes, returning its index
    pub fn add_member(
        &mut self,
        start: usize,
        end: usize,
        material: usize,
        section: usize,
    ) -> FrameResult<usize> {
        let a = self.nodes.get(start).ok_or(FrameError::NodeNotFound(start))?;
        let b = self.nodes.get(end).ok_or(FrameError::NodeNotFound(end))?;
        if material >= self.materials.len() {
            return Err(FrameError::MaterialNotFound(material));
        }
        if section >= self.sections.len() {
            return Err(FrameError::SectionNotFound(section));
        }

        if start == end || a.distance_to(b) < 1e-10 {
            return Err(FrameError::InvalidGeometry(format!(
                "Member has zero length: start={}, end={}",
                start, end
            )));
        }
        if self.members.iter().any(|m| m.connects(start, end)) {
            return Err(FrameError::DuplicateMember { start, end });
        }

        let mut member = Member::new(start, end, material, section);
        member.loads = vec![DistributedLoad::default(); self.load_cases.len()];
        member.temperatures = vec![Temperature::default(); self.load_cases.len()];
        self.members.push(member);
        self.results = None;
        Ok(self.members.len() - 1)
    }

    /// Add a load case, giving every node and member an empty entry for it
    pub fn add_load_case(&mut self, name: &str) -> FrameResult<LoadCaseId> {
        if self.load_cases.iter().any(|c| c.name == name) {
            return Err(FrameError::DuplicateName(name.to_string()));
        }

        self.load_cases.push(LoadCase::new(name));
        let n = self.load_cases.len();
        for node in &mut self.nodes {
            node.forces.resize(n, NodalForce::default());
        }
        for member in &mut self.members {
            member.loads.resize(n, DistributedLoad::default());
            member.temperatures.resize(n, Temperature::default());
        }
        self.results = None;
        Ok(LoadCaseId(n - 1))
    }

    /// Rename a load case
    pub fn rename_load_case(&mut self, case: LoadCaseId, name: &str) -> FrameResult<()> {
        let slot = self.check_case(case)?;
        if self
            .load_cases
            .iter()
            .enumerate()
            .any(|(i, c)| i != slot && c.name == name)
        {
            return Err(FrameError::DuplicateName(name.to_string()));
        }
        self.load_cases[slot].name = name.to_string();
        self.results = None;
        Ok(())
    }

    /// Find a load case by name
    pub fn load_case_id(&self, name: &str) -> FrameResult<LoadCaseId> {
        self.load_cases
            .iter()
            .position(|c| c.name == name)
            .map(LoadCaseId)
            .ok_or_else(|| FrameError::LoadCaseNotFound(name.to_string()))
    }

    /// Set the support conditions of a node
    pub fn set_support(&mut self, node: usize, support: Support) -> FrameResult<()> {
        self.node_mut(node)?.support = support;
        Ok(())
    }

    /// Release rotational continuity at a node
    pub fn set_node_hinge(&mut self, node: usize, hinged: bool) -> FrameResult<()> {
        self.node_mut(node)?.hinged = hinged;
        Ok(())
    }

    /// Set the end releases of a member
    pub fn set_member_hinges(&mut self, member: usize, hinges: MemberHinges) -> FrameResult<()> {
        self.member_mut(member)?.hinges = hinges;
        Ok(())
    }

    /// Set the force applied to a node in a load case
    pub fn set_nodal_force(
        &mut self,
        node: usize,
        case: LoadCaseId,
        force: NodalForce,
    ) -> FrameResult<()> {
        let slot = self.check_case(case)?;
        self.node_mut(node)?.forces[slot] = force;
        Ok(())
    }

    /// Set the distributed load on a member in a load case
    pub fn set_distributed_load(
        &mut self,
        member: usize,
        case: LoadCaseId,
        load: DistributedLoad,
    ) -> FrameResult<()> {
        let slot = self.check_case(case)?;
        self.member_mut(member)?.loads[slot] = load;
        Ok(())
    }

    /// Set the temperature change of a member in a load case
    pub fn set_temperature(
        &mut self,
        member: usize,
        case: LoadCaseId,
        temperature: Temperature,
    ) -> FrameResult<()> {
        let slot = self.check_case(case)?;
        self.member_mut(member)?.temperatures[slot] = temperature;
        Ok(())
    }

    fn check_case(&self, case: LoadCaseId) -> FrameResult<usize> {
        if case.index() < self.load_cases.len() {
            Ok(case.index())
        } else {
            Err(FrameError::LoadCaseNotFound(format!("#{}", case.index())))
        }
    }

    fn node_mut(&mut self, node: usize) -> FrameResult<&mut Node> {
        self.results = None;
        let n_cases = self.load_cases.len();
        let node = self.nodes.get_mut(node).ok_or(FrameError::NodeNotFound(node))?;
        node.forces.resize(n_cases, NodalForce::default());
        Ok(node)
    }

    fn member_mut(&mut self, member: usize) -> FrameResult<&mut Member> {
        self.results = None;
        let n_cases = self.load_cases.len();
        let member = self
            .members
            .get_mut(member)
            .ok_or(FrameError::MemberNotFound(member))?;
        member.loads.resize(n_cases, DistributedLoad::default());
        member.temperatures.resize(n_cases, Temperature::default());
        Ok(member)
    }

    // ========================
    // Analysis Methods
    // ========================

    /// Numeric snapshot of the model as seen by the solver
    pub fn model_data(&self) -> FrameResult<ModelData> {
        ModelData::extract(self)
    }

    /// Run linear static analysis with default options
    pub fn analyze(&mut self) -> FrameResult<()> {
        self.analyze_with(AnalysisOptions::default())
    }

    /// Run linear static analysis for every load case
    ///
    /// On failure no results are kept.
    pub fn analyze_with(&mut self, options: AnalysisOptions) -> FrameResult<()> {
        self.results = None;
        let data = self.model_data()?;
        let results = analysis::run(&data, &options)?;
        debug!("Storing results for {} load cases", results.load_cases.len());
        self.results = Some(results);
        Ok(())
    }

    // ========================
    // Result Access Methods
    // ========================

    /// Check if results of an analysis are available
    pub fn results_available(&self) -> bool {
        self.results.is_some()
    }

    /// Get the results of the last analysis
    pub fn results(&self) -> FrameResult<&AnalysisResults> {
        self.results.as_ref().ok_or(FrameError::NotAnalyzed)
    }

    fn case_results(&self, case: LoadCaseId) -> FrameResult<&LoadCaseResults> {
        self.results()?
            .case(case.index())
            .ok_or_else(|| FrameError::LoadCaseNotFound(format!("#{}", case.index())))
    }

    /// Get node displacement
    pub fn node_displacement(&self, node: usize, case: LoadCaseId) -> FrameResult<NodeDisplacement> {
        self.case_results(case)?
            .node_displacements
            .get(node)
            .copied()
            .ok_or(FrameError::NodeNotFound(node))
    }

    /// Get node reactions
    pub fn node_reactions(&self, node: usize, case: LoadCaseId) -> FrameResult<Reactions> {
        self.case_results(case)?
            .reactions
            .get(node)
            .copied()
            .ok_or(FrameError::NodeNotFound(node))
    }

    /// Get the local end forces of a member
    pub fn member_forces(&self, member: usize, case: LoadCaseId) -> FrameResult<MemberEndForces> {
        self.case_results(case)?
            .member_forces
            .get(member)
            .copied()
            .ok_or(FrameError::MemberNotFound(member))
    }

    /// Get the internal diagrams of a member
    pub fn member_diagram(&self, member: usize, case: LoadCaseId) -> FrameResult<&MemberDiagram> {
        self.case_results(case)?
            .diagrams
            .get(member)
            .ok_or(FrameError::MemberNotFound(member))
    }

    /// Get analysis summary
    pub fn summary(&self, case: LoadCaseId) -> FrameResult<AnalysisSummary> {
        self.results()?
            .summary(case.index())
            .ok_or_else(|| FrameError::LoadCaseNotFound(format!("#{}", case.index())))
    }

    /// Global force balance of a solved load case
    pub fn equilibrium_residual(&self, case: LoadCaseId) -> FrameResult<[f64; 2]> {
        let data = self.model_data()?;
        Ok(self.case_results(case)?.equilibrium_residual(&data, case.index()))
    }

    /// Get all load case names
    pub fn load_case_names(&self) -> Vec<String> {
        self.load_cases.iter().map(|c| c.name.clone()).collect()
    }
}
