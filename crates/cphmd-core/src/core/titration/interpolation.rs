//! Lambda-weighted blending of per-state electrostatic parameters.
//!
//! For a dynamic residue with titration lambda `x` and tautomer lambda `t`, each state of
//! its family carries a weight:
//!
//! | Family | States | Weights |
//! |---|---|---|
//! | Lysine | LYS, LYD | `x`, `1 − x` |
//! | Histidine | HIS, HID, HIE | `x`, `(1 − x)(1 − t)`, `(1 − x)t` |
//! | Asp / Glu | deprotonated, H1, H2 | `1 − x`, `x·t`, `x(1 − t)` |
//!
//! Parameters and their lambda derivatives are the weighted sums over states.

use super::families::TitratableFamily;
use super::tables::{StateSlot, TitrationTables};
use crate::core::models::residue::ResidueType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Weighting {
    Value,
    TitrationDerivative,
    TautomerDerivative,
}

fn state_weights(family: TitratableFamily, x: f64, t: f64, weighting: Weighting) -> [f64; 3] {
    use Weighting::*;
    match (family, weighting) {
        (TitratableFamily::Lysine, Value) => [x, 1.0 - x, 0.0],
        (TitratableFamily::Lysine, TitrationDerivative) => [1.0, -1.0, 0.0],
        (TitratableFamily::Lysine, TautomerDerivative) => [0.0; 3],
        (TitratableFamily::Histidine, Value) => [x, (1.0 - x) * (1.0 - t), (1.0 - x) * t],
        (TitratableFamily::Histidine, TitrationDerivative) => [1.0, -(1.0 - t), -t],
        (TitratableFamily::Histidine, TautomerDerivative) => [0.0, -(1.0 - x), 1.0 - x],
        (TitratableFamily::Aspartate | TitratableFamily::Glutamate, Value) => {
            [1.0 - x, x * t, x * (1.0 - t)]
        }
        (TitratableFamily::Aspartate | TitratableFamily::Glutamate, TitrationDerivative) => {
            [-1.0, t, 1.0 - t]
        }
        (TitratableFamily::Aspartate | TitratableFamily::Glutamate, TautomerDerivative) => {
            [0.0, x, -x]
        }
    }
}

impl TitrationTables {
    /// Collects the state slots of a dynamic residue's atom, in state order.
    fn atom_states(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
    ) -> Option<(TitratableFamily, Vec<&StateSlot>)> {
        if !residue_type.is_titratable() {
            return None;
        }
        let family = TitratableFamily::of(residue_type)?;
        let role = family.role_index(atom_name)?;
        let table = self.table(family)?;
        let slots = (0..family.state_count())
            .map(|state| table.slot(state, role))
            .collect::<Option<Vec<_>>>()?;
        Some((family, slots))
    }

    fn blend_multipole(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        x: f64,
        t: f64,
        weighting: Weighting,
    ) -> Option<[f64; 10]> {
        let (family, slots) = self.atom_states(residue_type, atom_name)?;
        let weights = state_weights(family, x, t, weighting);
        let mut blended = [0.0; 10];
        for (slot, w) in slots.iter().zip(weights) {
            let coefficients = slot.multipole_coefficients();
            for (out, c) in blended.iter_mut().zip(coefficients) {
                *out += w * c;
            }
        }
        Some(blended)
    }

    fn blend_polarizability(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        x: f64,
        t: f64,
        weighting: Weighting,
    ) -> Option<f64> {
        let (family, slots) = self.atom_states(residue_type, atom_name)?;
        let weights = state_weights(family, x, t, weighting);
        Some(
            slots
                .iter()
                .zip(weights)
                .map(|(slot, w)| w * slot.polarizability())
                .sum(),
        )
    }

    /// Multipole of an atom of a dynamic residue at the given lambdas.
    ///
    /// Returns `None` for residues that do not titrate and for atoms outside the family
    /// table; callers keep their fixed parameters for those.
    pub fn multipole(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        titration_lambda: f64,
        tautomer_lambda: f64,
    ) -> Option<[f64; 10]> {
        self.blend_multipole(
            residue_type,
            atom_name,
            titration_lambda,
            tautomer_lambda,
            Weighting::Value,
        )
    }

    pub fn multipole_titration_deriv(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        titration_lambda: f64,
        tautomer_lambda: f64,
    ) -> Option<[f64; 10]> {
        self.blend_multipole(
            residue_type,
            atom_name,
            titration_lambda,
            tautomer_lambda,
            Weighting::TitrationDerivative,
        )
    }

    pub fn multipole_tautomer_deriv(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        titration_lambda: f64,
        tautomer_lambda: f64,
    ) -> Option<[f64; 10]> {
        self.blend_multipole(
            residue_type,
            atom_name,
            titration_lambda,
            tautomer_lambda,
            Weighting::TautomerDerivative,
        )
    }

    pub fn polarizability(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        titration_lambda: f64,
        tautomer_lambda: f64,
    ) -> Option<f64> {
        self.blend_polarizability(
            residue_type,
            atom_name,
            titration_lambda,
            tautomer_lambda,
            Weighting::Value,
        )
    }

    pub fn polarizability_titration_deriv(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        titration_lambda: f64,
        tautomer_lambda: f64,
    ) -> Option<f64> {
        self.blend_polarizability(
            residue_type,
            atom_name,
            titration_lambda,
            tautomer_lambda,
            Weighting::TitrationDerivative,
        )
    }

    pub fn polarizability_tautomer_deriv(
        &self,
        residue_type: ResidueType,
        atom_name: &str,
        titration_lambda: f64,
        tautomer_lambda: f64,
    ) -> Option<f64> {
        self.blend_polarizability(
            residue_type,
            atom_name,
            titration_lambda,
            tautomer_lambda,
            Weighting::TautomerDerivative,
        )
    }

    /// Per-atom parameter slots of a fixed protonation state.
    ///
    /// Fixed identities map to one state of their family (ASH and GLH use their second
    /// tautomer). The unused proton site of the acids is left out. Dynamic acids and
    /// non-titratable residues return `None`.
    pub fn endstate_parameters(
        &self,
        residue_type: ResidueType,
    ) -> Option<Vec<(&'static str, &StateSlot)>> {
        let (family, state, skipped): (_, usize, &[&str]) = match residue_type {
            ResidueType::AsparticAcid => (TitratableFamily::Aspartate, 0, &["HD1"]),
            ResidueType::AsparticAcidNeutral => (TitratableFamily::Aspartate, 2, &["HD1"]),
            ResidueType::GlutamicAcid => (TitratableFamily::Glutamate, 0, &["HE1"]),
            ResidueType::GlutamicAcidNeutral => (TitratableFamily::Glutamate, 2, &["HE1"]),
            ResidueType::Histidine => (TitratableFamily::Histidine, 0, &[]),
            ResidueType::HistidineDelta => (TitratableFamily::Histidine, 1, &[]),
            ResidueType::HistidineEpsilon => (TitratableFamily::Histidine, 2, &[]),
            ResidueType::Lysine => (TitratableFamily::Lysine, 0, &[]),
            ResidueType::LysineNeutral => (TitratableFamily::Lysine, 1, &[]),
            _ => return None,
        };
        let row = self.table(family)?.state(state)?;
        Some(
            family
                .roles()
                .iter()
                .zip(row)
                .filter(|(spec, _)| !skipped.contains(&spec.name))
                .map(|(spec, slot)| (spec.name, slot))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::titration::tables::SoluteRadiiSource;
    use crate::testing::synthetic_forcefield;

    const STEP: f64 = 1e-6;
    const TOLERANCE: f64 = 1e-6;

    fn tables() -> TitrationTables {
        TitrationTables::build(&synthetic_forcefield(), SoluteRadiiSource::Solute).unwrap()
    }

    fn slot_coefficients(
        tables: &TitrationTables,
        family: TitratableFamily,
        state: usize,
        atom: &str,
    ) -> [f64; 10] {
        let role = family.role_index(atom).unwrap();
        tables.table(family).unwrap().slot(state, role).unwrap().multipole_coefficients()
    }

    #[test]
    fn endpoints_reproduce_state_parameters() {
        let tables = tables();
        let lys = tables.multipole(ResidueType::Lysine, "NZ", 1.0, 0.0).unwrap();
        let lyd = tables.multipole(ResidueType::Lysine, "NZ", 0.0, 0.0).unwrap();
        assert_eq!(lys, slot_coefficients(&tables, TitratableFamily::Lysine, 0, "NZ"));
        assert_eq!(lyd, slot_coefficients(&tables, TitratableFamily::Lysine, 1, "NZ"));

        let hie = tables.multipole(ResidueType::Histidine, "NE2", 0.0, 1.0).unwrap();
        assert_eq!(hie, slot_coefficients(&tables, TitratableFamily::Histidine, 2, "NE2"));

        let ash1 = tables.multipole(ResidueType::AsparticAcidDynamic, "OD1", 1.0, 1.0).unwrap();
        assert_eq!(ash1, slot_coefficients(&tables, TitratableFamily::Aspartate, 1, "OD1"));
    }

    #[test]
    fn absent_proton_fades_out_with_titration_lambda() {
        let tables = tables();
        let hz3 = tables.multipole(ResidueType::Lysine, "HZ3", 0.0, 0.0).unwrap();
        assert_eq!(hz3, [0.0; 10]);
        assert_eq!(tables.polarizability(ResidueType::Lysine, "HZ3", 0.0, 0.0), Some(0.0));
    }

    #[test]
    fn multipole_derivatives_match_finite_differences() {
        let tables = tables();
        for (residue_type, atom) in [
            (ResidueType::AsparticAcidDynamic, "OD2"),
            (ResidueType::GlutamicAcidDynamic, "HE1"),
            (ResidueType::Histidine, "HD1"),
            (ResidueType::Lysine, "HZ3"),
        ] {
            let (x, t) = (0.37, 0.61);
            let dx = tables.multipole_titration_deriv(residue_type, atom, x, t).unwrap();
            let dt = tables.multipole_tautomer_deriv(residue_type, atom, x, t).unwrap();
            let xp = tables.multipole(residue_type, atom, x + STEP, t).unwrap();
            let xm = tables.multipole(residue_type, atom, x - STEP, t).unwrap();
            let tp = tables.multipole(residue_type, atom, x, t + STEP).unwrap();
            let tm = tables.multipole(residue_type, atom, x, t - STEP).unwrap();
            for k in 0..10 {
                let fd_x = (xp[k] - xm[k]) / (2.0 * STEP);
                let fd_t = (tp[k] - tm[k]) / (2.0 * STEP);
                assert!((dx[k] - fd_x).abs() < TOLERANCE, "{residue_type} {atom} dx[{k}]");
                assert!((dt[k] - fd_t).abs() < TOLERANCE, "{residue_type} {atom} dt[{k}]");
            }
        }
    }

    #[test]
    fn acid_tautomer_derivative_is_titration_weighted_difference_of_protonated_states() {
        let tables = tables();
        let x = 0.8;
        let dt = tables
            .multipole_tautomer_deriv(ResidueType::AsparticAcidDynamic, "OD1", x, 0.3)
            .unwrap();
        let ash1 = slot_coefficients(&tables, TitratableFamily::Aspartate, 1, "OD1");
        let ash2 = slot_coefficients(&tables, TitratableFamily::Aspartate, 2, "OD1");
        for k in 0..10 {
            assert!((dt[k] - x * (ash1[k] - ash2[k])).abs() < 1e-12);
        }
    }

    #[test]
    fn polarizability_derivatives_match_finite_differences() {
        let tables = tables();
        let (x, t) = (0.42, 0.25);
        let dx = tables
            .polarizability_titration_deriv(ResidueType::Histidine, "HE2", x, t)
            .unwrap();
        let dt = tables.polarizability_tautomer_deriv(ResidueType::Histidine, "HE2", x, t).unwrap();
        let p = |x, t| tables.polarizability(ResidueType::Histidine, "HE2", x, t).unwrap();
        assert!((dx - (p(x + STEP, t) - p(x - STEP, t)) / (2.0 * STEP)).abs() < TOLERANCE);
        assert!((dt - (p(x, t + STEP) - p(x, t - STEP)) / (2.0 * STEP)).abs() < TOLERANCE);
    }

    #[test]
    fn lysine_has_no_tautomer_dependence() {
        let tables = tables();
        assert_eq!(
            tables.multipole_tautomer_deriv(ResidueType::Lysine, "NZ", 0.3, 0.9),
            Some([0.0; 10])
        );
    }

    #[test]
    fn non_dynamic_residues_and_unknown_atoms_are_not_interpolated() {
        let tables = tables();
        assert!(tables.multipole(ResidueType::AsparticAcid, "OD1", 0.5, 0.5).is_none());
        assert!(tables.multipole(ResidueType::Glycine, "CA", 0.5, 0.5).is_none());
        assert!(tables.multipole(ResidueType::Lysine, "CA", 0.5, 0.5).is_none());
    }

    #[test]
    fn endstate_parameters_skip_unused_acid_proton() {
        let tables = tables();
        let ash = tables.endstate_parameters(ResidueType::AsparticAcidNeutral).unwrap();
        let names: Vec<_> = ash.iter().map(|(name, _)| *name).collect();
        assert!(!names.contains(&"HD1"));
        assert!(names.contains(&"HD2"));
        let hd2 = ash.iter().find(|(name, _)| *name == "HD2").unwrap().1;
        assert!(matches!(hd2, StateSlot::Present(_)));

        let lyd = tables.endstate_parameters(ResidueType::LysineNeutral).unwrap();
        let hz3 = lyd.iter().find(|(name, _)| *name == "HZ3").unwrap().1;
        assert_eq!(hz3, &StateSlot::Absent);

        assert!(tables.endstate_parameters(ResidueType::AsparticAcidDynamic).is_none());
    }
}
