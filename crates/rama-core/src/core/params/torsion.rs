use crate::core::energy::potentials::angular_separation;
use serde::Serialize;

/// Coarse structural class of a torsion-angle region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StructuralClass {
    Helix,
    Sheet,
    Extended,
    Coil,
}

/// A named elliptical window in (phi, psi) space with a base energy offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TorsionRegion {
    pub name: &'static str,
    pub phi_center: f64,
    pub psi_center: f64,
    pub phi_width: f64,
    pub psi_width: f64,
    /// Depth of the region relative to the featureless background, kcal/mol.
    pub base_energy_offset: f64,
    pub class: StructuralClass,
}

impl TorsionRegion {
    /// Squared normalized elliptical radius of (phi, psi) from the region
    /// center; <= 1.0 means the point lies inside the window. Angular
    /// distances wrap at 360 degrees.
    pub fn elliptical_radius_sq(&self, phi: f64, psi: f64) -> f64 {
        let dphi = angular_separation(phi, self.phi_center) / self.phi_width;
        let dpsi = angular_separation(psi, self.psi_center) / self.psi_width;
        dphi * dphi + dpsi * dpsi
    }

    pub fn contains(&self, phi: f64, psi: f64) -> bool {
        self.elliptical_radius_sq(phi, psi) <= 1.0
    }
}

const fn region(
    name: &'static str,
    phi_center: f64,
    psi_center: f64,
    phi_width: f64,
    psi_width: f64,
    base_energy_offset: f64,
    class: StructuralClass,
) -> TorsionRegion {
    TorsionRegion {
        name,
        phi_center,
        psi_center,
        phi_width,
        psi_width,
        base_energy_offset,
        class,
    }
}

const BUILTIN_REGIONS: [TorsionRegion; 8] = [
    region("alpha-right", -63.0, -43.0, 35.0, 35.0, -1.2, StructuralClass::Helix),
    region("three-ten", -74.0, -4.0, 25.0, 25.0, -0.5, StructuralClass::Helix),
    region("alpha-left", 60.0, 45.0, 25.0, 25.0, 0.9, StructuralClass::Helix),
    region("beta-antiparallel", -140.0, 135.0, 40.0, 45.0, -0.9, StructuralClass::Sheet),
    region("beta-parallel", -115.0, 115.0, 35.0, 40.0, -0.7, StructuralClass::Sheet),
    region("polyproline-two", -75.0, 150.0, 25.0, 30.0, -0.4, StructuralClass::Extended),
    region("fully-extended", -155.0, 160.0, 30.0, 30.0, -0.2, StructuralClass::Extended),
    region("bridge-coil", -100.0, 30.0, 50.0, 50.0, 0.6, StructuralClass::Coil),
];

/// The fixed ordered set of named torsion-angle regions.
///
/// Immutable after construction; the builtin map carries the eight regions
/// of the reference model, and custom region sets can be supplied for
/// testing.
#[derive(Debug, Clone, PartialEq)]
pub struct TorsionEnergyMap {
    regions: Vec<TorsionRegion>,
}

impl Default for TorsionEnergyMap {
    fn default() -> Self {
        Self::from_regions(BUILTIN_REGIONS)
    }
}

impl TorsionEnergyMap {
    pub fn from_regions(regions: impl IntoIterator<Item = TorsionRegion>) -> Self {
        Self {
            regions: regions.into_iter().collect(),
        }
    }

    pub fn regions(&self) -> &[TorsionRegion] {
        &self.regions
    }
}
