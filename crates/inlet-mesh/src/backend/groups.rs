//! Boundary-condition naming and physical group construction.

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::topology::{CurveId, CurveRole, SurfaceId, Topology};

/// Boundary-condition name per curve role, as the downstream solver expects
/// them. Roles mapped to the same name land in one group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryNames {
    pub fluid: String,
    pub bottom: String,
    pub wall: String,
    pub inlet: String,
    pub top: String,
    pub outlet: String,
    pub exterior_outlet: String,
}

impl Default for BoundaryNames {
    /// Far boundaries collapse into `farfield`; the pre-ramp wall keeps its
    /// own `bottom` tag.
    fn default() -> Self {
        Self {
            fluid: "fluid".into(),
            bottom: "bottom".into(),
            wall: "wall".into(),
            inlet: "farfield".into(),
            top: "farfield".into(),
            outlet: "outlet".into(),
            exterior_outlet: "farfield".into(),
        }
    }
}

impl BoundaryNames {
    /// Open-boundary convention: separate `inlet` and `top`, both exits in
    /// `outlet`, the pre-ramp wall counted as `wall`.
    pub fn open() -> Self {
        Self {
            fluid: "fluid".into(),
            bottom: "wall".into(),
            wall: "wall".into(),
            inlet: "inlet".into(),
            top: "top".into(),
            outlet: "outlet".into(),
            exterior_outlet: "outlet".into(),
        }
    }

    /// Name for a boundary role; `None` for internal splits.
    pub fn name(&self, role: CurveRole) -> Option<&str> {
        let name = match role {
            CurveRole::Bottom => &self.bottom,
            CurveRole::Wall => &self.wall,
            CurveRole::Inlet => &self.inlet,
            CurveRole::Top => &self.top,
            CurveRole::Outlet => &self.outlet,
            CurveRole::ExteriorOutlet => &self.exterior_outlet,
            CurveRole::InternalSplit => return None,
        };
        Some(name.as_str())
    }
}

/// Entities of one physical group.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupMembers {
    Curves(Vec<CurveId>),
    Surfaces(Vec<SurfaceId>),
}

/// Named set of curves or surfaces exposed as a boundary-condition tag.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalGroup {
    pub name: String,
    pub members: GroupMembers,
}

impl PhysicalGroup {
    pub fn dim(&self) -> u8 {
        match self.members {
            GroupMembers::Curves(_) => 1,
            GroupMembers::Surfaces(_) => 2,
        }
    }

    pub fn len(&self) -> usize {
        match &self.members {
            GroupMembers::Curves(c) => c.len(),
            GroupMembers::Surfaces(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_curve(&self, id: CurveId) -> bool {
        matches!(&self.members, GroupMembers::Curves(c) if c.contains(&id))
    }
}

/// One surface group over the whole fluid region, then one curve group per
/// distinct boundary name in role order. Names left empty leave their curves
/// ungrouped, which is rejected.
pub fn build_groups(
    topo: &Topology,
    names: &BoundaryNames,
) -> Result<Vec<PhysicalGroup>, TopologyError> {
    let mut groups = vec![PhysicalGroup {
        name: names.fluid.clone(),
        members: GroupMembers::Surfaces(topo.surface_ids().collect()),
    }];
    let mut curve_groups: Vec<(String, Vec<CurveId>)> = Vec::new();
    for role in CurveRole::BOUNDARY {
        let ids = topo.roles().get(role);
        let Some(name) = names.name(role).filter(|n| !n.is_empty()) else {
            continue;
        };
        if ids.is_empty() {
            continue;
        }
        match curve_groups.iter_mut().find(|(n, _)| n == name) {
            Some((_, members)) => members.extend_from_slice(ids),
            None => curve_groups.push((name.to_string(), ids.to_vec())),
        }
    }
    groups.extend(curve_groups.into_iter().map(|(name, mut members)| {
        members.sort();
        PhysicalGroup {
            name,
            members: GroupMembers::Curves(members),
        }
    }));

    for id in topo.curve_ids() {
        let count = groups.iter().filter(|g| g.contains_curve(id)).count();
        let expected = usize::from(topo.curve(id).role.is_boundary());
        if count != expected {
            return Err(TopologyError::UngroupedCurve {
                curve: topo.curve(id).label.to_string(),
                groups: count,
            });
        }
    }
    tracing::debug!(groups = groups.len(), "physical groups assigned");
    Ok(groups)
}
