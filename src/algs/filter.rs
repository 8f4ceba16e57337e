//! Pipeline adapter: mesh → mesh transforms.
//!
//! A host pipeline drives stages through [`MeshFilter`]; each stage borrows
//! its input and returns a fresh mesh. Stages own no scheduling logic.

use crate::algs::bonds::BondCounter;
use crate::mesh::PolyMesh;
use crate::mesh_error::MeshBondsError;

/// One stage of a mesh processing pipeline.
pub trait MeshFilter {
    /// Stage name used in log output.
    fn name(&self) -> &str;

    /// Produce the output mesh for `input`.
    fn apply(&self, input: &PolyMesh) -> Result<PolyMesh, MeshBondsError>;
}

impl MeshFilter for BondCounter {
    fn name(&self) -> &str {
        "CountBonds"
    }

    fn apply(&self, input: &PolyMesh) -> Result<PolyMesh, MeshBondsError> {
        self.execute(input).map(|out| out.mesh)
    }
}

/// Drops one point array by name; topology is shared with the input.
#[derive(Clone, Debug)]
pub struct RemovePointArray {
    pub name: String,
}

impl RemovePointArray {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MeshFilter for RemovePointArray {
    fn name(&self) -> &str {
        "RemovePointArray"
    }

    fn apply(&self, input: &PolyMesh) -> Result<PolyMesh, MeshBondsError> {
        let mut out = input.shallow_copy();
        out.point_data_mut().remove(&self.name);
        Ok(out)
    }
}

/// Run `filters` in order, feeding each output to the next stage.
pub fn apply_filters(
    input: &PolyMesh,
    filters: &[&dyn MeshFilter],
) -> Result<PolyMesh, MeshBondsError> {
    let mut current = input.shallow_copy();
    for f in filters {
        log::debug!("Running filter {}", f.name());
        current = f.apply(&current)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::bonds::NUM_BONDS;
    use crate::mesh_generation::chain_mesh;

    #[test]
    fn bond_counter_as_filter() {
        let mesh = chain_mesh(3).unwrap();
        let counter = BondCounter::default();
        assert_eq!(MeshFilter::name(&counter), "CountBonds");
        let out = counter.apply(&mesh).unwrap();
        assert!(out.point_data().contains(NUM_BONDS));
        assert!(out.shares_topology_with(&mesh));
    }

    #[test]
    fn chain_of_filters() {
        let mesh = chain_mesh(3).unwrap();
        let counter = BondCounter::default();
        let strip = RemovePointArray::new(NUM_BONDS);
        let out = apply_filters(&mesh, &[&counter, &strip]).unwrap();
        assert!(out.point_data().is_empty());
        let out = apply_filters(&mesh, &[&counter, &strip, &counter]).unwrap();
        assert_eq!(out.point_data().len(), 1);
        assert!(apply_filters(&mesh, &[]).unwrap().point_data().is_empty());
    }
}
