use std::collections::{HashMap, HashSet};

use crate::arrangement::{Arrangement, HalfEdgeId, VertexId};
use crate::error::{Result, TopologyError};

/// Validates the half-edge invariants of an arrangement.
///
/// Checked: twin symmetry, `next`/`prev` inversion, that each half-edge's
/// twin starts where it ends, that every boundary cycle closes on a single
/// face and is recorded by exactly one face, that isolated vertices are
/// listed by exactly one face, and Euler's relation
/// `V − E + F = 1 + components`.
#[derive(Debug, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation, returning `true` if the arrangement is valid.
    #[must_use]
    pub fn execute(&self, arrangement: &Arrangement) -> bool {
        self.check(arrangement).is_ok()
    }

    /// Runs the validation and reports the first violated invariant.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` describing the violation.
    pub fn check(&self, arrangement: &Arrangement) -> Result<()> {
        check_half_edges(arrangement)?;
        check_cycles(arrangement)?;
        check_vertices(arrangement)?;
        check_euler(arrangement)
    }
}

fn invalid(msg: impl Into<String>) -> crate::error::PlanisError {
    TopologyError::InvalidTopology(msg.into()).into()
}

fn check_half_edges(arrangement: &Arrangement) -> Result<()> {
    for (id, he) in arrangement.half_edges() {
        let twin = arrangement.half_edge(he.twin)?;
        if he.twin == id || twin.twin != id {
            return Err(invalid("twin links are not symmetric"));
        }
        if arrangement.half_edge(he.next)?.prev != id {
            return Err(invalid("next.prev does not return to the half-edge"));
        }
        if arrangement.half_edge(he.prev)?.next != id {
            return Err(invalid("prev.next does not return to the half-edge"));
        }
        if arrangement.half_edge(he.next)?.source != twin.source {
            return Err(invalid("next half-edge does not start at the target"));
        }
        if he.source == twin.source {
            return Err(invalid("edge is a self-loop"));
        }
        arrangement.face(he.face)?;
    }
    Ok(())
}

fn check_cycles(arrangement: &Arrangement) -> Result<()> {
    // Map each half-edge to a canonical cycle representative.
    let mut cycle_of: HashMap<HalfEdgeId, HalfEdgeId> = HashMap::new();
    for (id, he) in arrangement.half_edges() {
        if cycle_of.contains_key(&id) {
            continue;
        }
        for member in arrangement.cycle(id)? {
            if arrangement.half_edge(member)?.face != he.face {
                return Err(invalid("boundary cycle spans several faces"));
            }
            cycle_of.insert(member, id);
        }
    }

    let mut recorded: HashMap<HalfEdgeId, usize> = HashMap::new();
    for (face_id, face) in arrangement.faces() {
        if face.unbounded == face.outer.is_some() {
            return Err(invalid("only the unbounded face may lack an outer boundary"));
        }
        for &start in face.outer.iter().chain(face.holes.iter()) {
            if arrangement.half_edge(start)?.face != face_id {
                return Err(invalid("face records a cycle of another face"));
            }
            let rep = cycle_of
                .get(&start)
                .ok_or_else(|| invalid("face records an unknown half-edge"))?;
            *recorded.entry(*rep).or_default() += 1;
        }
        if let Some(area) = arrangement.outer_area(face_id)? {
            if area <= 0.0 {
                return Err(invalid("bounded face outer boundary is not counter-clockwise"));
            }
        }
    }

    let cycles: HashSet<HalfEdgeId> = cycle_of.values().copied().collect();
    for rep in cycles {
        if recorded.get(&rep).copied().unwrap_or(0) != 1 {
            return Err(invalid("boundary cycle is not recorded by exactly one face"));
        }
    }
    Ok(())
}

fn check_vertices(arrangement: &Arrangement) -> Result<()> {
    let mut listed: HashMap<VertexId, usize> = HashMap::new();
    for (_, face) in arrangement.faces() {
        for &v in &face.isolated {
            *listed.entry(v).or_default() += 1;
        }
    }
    for (id, vertex) in arrangement.vertices() {
        let count = listed.get(&id).copied().unwrap_or(0);
        match vertex.incident {
            Some(he) => {
                if arrangement.half_edge(he)?.source != id {
                    return Err(invalid("vertex incident half-edge starts elsewhere"));
                }
                if count != 0 {
                    return Err(invalid("connected vertex listed as isolated"));
                }
            }
            None => {
                if count != 1 {
                    return Err(invalid("isolated vertex not listed by exactly one face"));
                }
            }
        }
    }
    Ok(())
}

fn check_euler(arrangement: &Arrangement) -> Result<()> {
    let v = arrangement.vertex_count();
    let e = arrangement.edge_count();
    let f = arrangement.face_count();
    let c = component_count(arrangement)?;
    if v + f != e + 1 + c {
        return Err(invalid(format!(
            "Euler relation violated: V={v} E={e} F={f} components={c}"
        )));
    }
    Ok(())
}

/// Counts connected components of the vertex/edge graph. Every isolated
/// vertex is its own component.
///
/// # Errors
///
/// Returns an error if a half-edge references a missing entity.
pub fn component_count(arrangement: &Arrangement) -> Result<usize> {
    let mut seen: HashSet<VertexId> = HashSet::new();
    let mut components = 0;
    for (start, _) in arrangement.vertices() {
        if !seen.insert(start) {
            continue;
        }
        components += 1;
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            for out in arrangement.outgoing(v)? {
                let w = arrangement.target(out)?;
                if seen.insert(w) {
                    stack.push(w);
                }
            }
        }
    }
    Ok(components)
}
