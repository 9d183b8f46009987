use crate::base::{t2_from_array, Grid};
use crate::util::ReferenceData;
use crate::StrError;

/// Queries whether A failed to compare with B or not
///
/// Returns `(fail, diff)`
fn query_failed(a: f64, b: f64, tol: f64, verbose: usize) -> (bool, f64) {
    let diff = f64::abs(a - b);
    let fail = diff > tol;
    if verbose == 1 {
        let mrk = if fail { "❌" } else { "➖" };
        print!("{:15.6e}{} ", diff, mrk);
    } else if verbose == 2 {
        let mrk = if fail { "❌" } else { "➖" };
        print!("{:9.2e} vs {:9.2e}({:9.2e}{}) ", a, b, diff, mrk);
    }
    (fail, diff)
}

/// Compares the matrix results (stress, plastic strain, yield index, energy) against reference data
///
/// The matrix is allocated from the materials in the reference data.
///
/// # Input
///
/// * `reference` -- The reference data
/// * `tol_stress` -- A tolerance to compare stresses
/// * `tol_strain` -- A tolerance to compare plastic strains and energies
/// * `verbose` -- Enables the verbose mode:
///   - 0 => no output
///   - 1 => shows error
///   - 2 => shows values and error
pub fn compare_results(
    reference: &ReferenceData,
    tol_stress: f64,
    tol_strain: f64,
    verbose: usize,
) -> Result<bool, StrError> {
    let mat = reference.matrix()?;
    let eps = reference.strain_grid()?;
    let (nelem, nip) = (mat.nelem(), mat.nip());
    if reference.stress.len() != nelem
        || reference.epsp.len() != nelem
        || reference.find.len() != nelem
        || reference.energy.len() != nelem
    {
        return Err("the number of elements must equal the reference number of elements");
    }

    // results
    let sig = mat.stress(&eps)?;
    let epsp = mat.epsp(&eps)?;
    let find = mat.find(&eps)?;
    let energy = mat.energy(&eps)?;

    // stats
    let mut diff_stress_max = f64::MIN;
    let mut diff_epsp_max = f64::MIN;
    let mut diff_energy_max = f64::MIN;
    let mut all_good = true;

    // check stresses
    if verbose > 0 {
        println!("ERROR ON STRESSES");
    }
    let sig_ref = Grid::from_rows(&reference.stress)?;
    sig_ref
        .check_dims(nelem, nip)
        .map_err(|_| "the number of integration points must equal the reference number (stress)")?;
    let sig_ref = sig_ref.try_map(t2_from_array)?;
    for e in 0..nelem {
        for q in 0..nip {
            for i in 0..3 {
                for j in 0..3 {
                    let a = sig.get(e, q).get(i, j);
                    let b = sig_ref.get(e, q).get(i, j);
                    let (fail, diff) = query_failed(a, b, tol_stress, verbose);
                    diff_stress_max = f64::max(diff_stress_max, diff);
                    if fail {
                        all_good = false;
                    }
                }
            }
            if verbose > 0 {
                println!();
            }
        }
    }

    // check plastic strains, yield indices and energies
    if verbose > 0 {
        println!("ERROR ON PLASTIC STRAINS AND ENERGIES");
    }
    let epsp_ref = Grid::from_rows(&reference.epsp)?;
    let find_ref = Grid::from_rows(&reference.find)?;
    let energy_ref = Grid::from_rows(&reference.energy)?;
    for grid in [epsp_ref.dims(), find_ref.dims(), energy_ref.dims()] {
        if grid != (nelem, nip) {
            return Err("the number of integration points must equal the reference number (scalars)");
        }
    }
    for e in 0..nelem {
        for q in 0..nip {
            let (fail, diff) = query_failed(*epsp.get(e, q), *epsp_ref.get(e, q), tol_strain, verbose);
            diff_epsp_max = f64::max(diff_epsp_max, diff);
            if fail {
                all_good = false;
            }
            let (fail, diff) = query_failed(*energy.get(e, q), *energy_ref.get(e, q), tol_strain, verbose);
            diff_energy_max = f64::max(diff_energy_max, diff);
            if fail {
                all_good = false;
            }
            if find.get(e, q) != find_ref.get(e, q) {
                if verbose > 0 {
                    print!("find: {} vs {}❌", find.get(e, q), find_ref.get(e, q));
                }
                all_good = false;
            }
            if verbose > 0 {
                println!();
            }
        }
    }
    if verbose > 0 {
        println!("\ndiff_stress_max = {:9.2e}", diff_stress_max);
        println!("diff_epsp_max   = {:9.2e}", diff_epsp_max);
        println!("diff_energy_max = {:9.2e}", diff_energy_max);
        println!();
    }
    Ok(all_good)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
