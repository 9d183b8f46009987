use super::{MaterialPoint, Potential};
use crate::base::{epsd_grid, i2, i4, i4d, i4rt, i4s, ii, sigd_grid, Grid, Kind, ParamPotential, Settings, MANDEL};
use crate::StrError;
use rayon::prelude::*;
use russell_lab::Vector;
use russell_tensor::{Mandel, Tensor2, Tensor4};
use tracing::debug;

/// Holds the material points of a (nelem, nip) grid
///
/// Each cell of the grid refers to one entry of a shared table of material points; thus cells
/// configured together (with one call to a `set_*` function) share the same parameters and
/// yield strains without duplicating them.
///
/// The table only holds material points referenced by at least one cell: the entries released by
/// [Matrix::unset] and the unreferenced rows of parameter tables are dropped.
///
/// The matrix must be partitioned before any evaluation: every cell must be assigned to exactly
/// one potential. Assigning a cell twice is an error; [Matrix::unset] must be called first.
///
/// All evaluations are pure per-point operations running in parallel. If any point fails,
/// the evaluation returns an error and no output.
#[derive(Clone, Debug)]
pub struct Matrix {
    /// Number of elements
    nelem: usize,

    /// Number of integration points per element
    nip: usize,

    /// Settings applied to all points configured from now on
    settings: Settings,

    /// Holds the material points referenced by the cells
    points: Vec<MaterialPoint>,

    /// Holds the kind of potential of each cell
    kind: Grid<Kind>,

    /// Holds the index in `points` of each cell
    index: Grid<usize>,
}

impl Matrix {
    /// Allocates a new instance with all points unset
    pub fn new(nelem: usize, nip: usize) -> Self {
        Matrix::new_with(nelem, nip, &Settings::new())
    }

    /// Allocates a new instance with all points unset and the given settings
    pub fn new_with(nelem: usize, nip: usize, settings: &Settings) -> Self {
        Matrix {
            nelem,
            nip,
            settings: *settings,
            points: Vec::new(),
            kind: Grid::new(nelem, nip, Kind::Unset),
            index: Grid::new(nelem, nip, 0),
        }
    }

    /// Returns the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the space dimension of the tensors
    #[inline]
    pub fn ndim(&self) -> usize {
        3
    }

    /// Returns the number of elements
    #[inline]
    pub fn nelem(&self) -> usize {
        self.nelem
    }

    /// Returns the number of integration points per element
    #[inline]
    pub fn nip(&self) -> usize {
        self.nip
    }

    /// Returns the kind of potential of each point
    pub fn kinds(&self) -> &Grid<Kind> {
        &self.kind
    }

    /// Returns true for the points with the Elastic potential
    pub fn is_elastic(&self) -> Grid<bool> {
        self.kind.map(|k| *k == Kind::Elastic)
    }

    /// Returns true for the points with a sequence of yield strains (Cusp or Smooth)
    pub fn is_plastic(&self) -> Grid<bool> {
        self.kind.map(|k| k.is_plastic())
    }

    /// Returns true for the points with the Cusp potential
    pub fn is_cusp(&self) -> Grid<bool> {
        self.kind.map(|k| *k == Kind::Cusp)
    }

    /// Returns true for the points with the Smooth potential
    pub fn is_smooth(&self) -> Grid<bool> {
        self.kind.map(|k| *k == Kind::Smooth)
    }

    /// Returns the bulk modulus of each point (NaN if unset)
    pub fn bulk(&self) -> Grid<f64> {
        self.broadcast_scalar(|p| p.bulk())
    }

    /// Returns the shear modulus of each point (NaN if unset)
    pub fn shear(&self) -> Grid<f64> {
        self.broadcast_scalar(|p| p.shear())
    }

    /// Returns the number of distinct material points held in the shared table
    pub fn n_material(&self) -> usize {
        self.points.len()
    }

    /// Returns an access to the material point at (e, q)
    pub fn point(&self, e: usize, q: usize) -> Result<&MaterialPoint, StrError> {
        let kind = self.kind.try_get(e, q).map_err(|_| "point index is out of range")?;
        if *kind == Kind::Unset {
            return Err("material is not set for this point");
        }
        let k = self.index.try_get(e, q)?;
        self.points.get(*k).ok_or("material point is missing from the table")
    }

    /// Returns I (second-order identity) at every point
    pub fn i2(&self) -> Grid<Tensor2> {
        Grid::new(self.nelem, self.nip, i2(MANDEL))
    }

    /// Returns II = I ⊗ I at every point
    pub fn ii(&self) -> Grid<Tensor4> {
        Grid::new(self.nelem, self.nip, ii(MANDEL))
    }

    /// Returns I4 (I4 : A = A) at every point
    ///
    /// Uses the general Mandel representation since I4 lacks the minor symmetries.
    pub fn i4(&self) -> Grid<Tensor4> {
        Grid::new(self.nelem, self.nip, i4())
    }

    /// Returns I4rt (I4rt : A = Aᵀ) at every point (general Mandel representation)
    pub fn i4rt(&self) -> Grid<Tensor4> {
        Grid::new(self.nelem, self.nip, i4rt())
    }

    /// Returns the symmetric fourth-order identity I4s at every point (general Mandel representation)
    pub fn i4s(&self) -> Grid<Tensor4> {
        Grid::new(self.nelem, self.nip, i4s(Mandel::General))
    }

    /// Returns the deviatoric projector I4d = I4s - II/3 at every point
    pub fn i4d(&self) -> Grid<Tensor4> {
        Grid::new(self.nelem, self.nip, i4d(MANDEL))
    }

    /// Assigns the Elastic potential to the points selected by the mask
    pub fn set_elastic(&mut self, mask: &Grid<bool>, kk: f64, gg: f64) -> Result<&mut Self, StrError> {
        self.set_param(mask, &ParamPotential::Elastic { kk, gg })
    }

    /// Assigns the Cusp potential to the points selected by the mask
    pub fn set_cusp(&mut self, mask: &Grid<bool>, kk: f64, gg: f64, epsy: &[f64]) -> Result<&mut Self, StrError> {
        let epsy = epsy.to_vec();
        self.set_param(mask, &ParamPotential::Cusp { kk, gg, epsy })
    }

    /// Assigns the Smooth potential to the points selected by the mask
    pub fn set_smooth(&mut self, mask: &Grid<bool>, kk: f64, gg: f64, epsy: &[f64]) -> Result<&mut Self, StrError> {
        let epsy = epsy.to_vec();
        self.set_param(mask, &ParamPotential::Smooth { kk, gg, epsy })
    }

    /// Assigns the potential described by the parameters to the points selected by the mask
    ///
    /// All selected points share one material point.
    pub fn set_param(&mut self, mask: &Grid<bool>, param: &ParamPotential) -> Result<&mut Self, StrError> {
        self.check_mask(mask)?;
        let point = MaterialPoint::new(param, &self.settings)?;
        let kind = point.kind();
        let n = self.points.len();
        self.points.push(point);
        for (k, selected) in mask.as_slice().iter().enumerate() {
            if *selected {
                self.kind.as_mut_slice()[k] = kind;
                self.index.as_mut_slice()[k] = n;
            }
        }
        self.compact();
        debug!(kind = ?kind, npoint = mask.count(), nmaterial = self.points.len(), "set material");
        Ok(self)
    }

    /// Assigns the Elastic potential with per-point parameters to the points selected by the mask
    ///
    /// # Input
    ///
    /// * `mask` -- selects the points
    /// * `idx` -- row of the parameter table of each point (only the selected points are read)
    /// * `kk` -- bulk modulus of each row
    /// * `gg` -- shear modulus of each row
    pub fn set_elastic_table(
        &mut self,
        mask: &Grid<bool>,
        idx: &Grid<usize>,
        kk: &Vector,
        gg: &Vector,
    ) -> Result<&mut Self, StrError> {
        let nrow = table_nrow(kk, gg, None)?;
        let params: Vec<_> = (0..nrow)
            .map(|r| ParamPotential::Elastic { kk: kk[r], gg: gg[r] })
            .collect();
        self.set_table(mask, idx, &params)
    }

    /// Assigns the Cusp potential with per-point parameters to the points selected by the mask
    ///
    /// # Input
    ///
    /// * `mask` -- selects the points
    /// * `idx` -- row of the parameter table of each point (only the selected points are read)
    /// * `kk` -- bulk modulus of each row
    /// * `gg` -- shear modulus of each row
    /// * `epsy` -- yield strains of each row
    pub fn set_cusp_table(
        &mut self,
        mask: &Grid<bool>,
        idx: &Grid<usize>,
        kk: &Vector,
        gg: &Vector,
        epsy: &russell_lab::Matrix,
    ) -> Result<&mut Self, StrError> {
        let nrow = table_nrow(kk, gg, Some(epsy))?;
        let params: Vec<_> = (0..nrow)
            .map(|r| ParamPotential::Cusp {
                kk: kk[r],
                gg: gg[r],
                epsy: table_row(epsy, r),
            })
            .collect();
        self.set_table(mask, idx, &params)
    }

    /// Assigns the Smooth potential with per-point parameters to the points selected by the mask
    ///
    /// See [Matrix::set_cusp_table].
    pub fn set_smooth_table(
        &mut self,
        mask: &Grid<bool>,
        idx: &Grid<usize>,
        kk: &Vector,
        gg: &Vector,
        epsy: &russell_lab::Matrix,
    ) -> Result<&mut Self, StrError> {
        let nrow = table_nrow(kk, gg, Some(epsy))?;
        let params: Vec<_> = (0..nrow)
            .map(|r| ParamPotential::Smooth {
                kk: kk[r],
                gg: gg[r],
                epsy: table_row(epsy, r),
            })
            .collect();
        self.set_table(mask, idx, &params)
    }

    /// Removes the potential of the points selected by the mask
    pub fn unset(&mut self, mask: &Grid<bool>) -> Result<&mut Self, StrError> {
        mask.check_dims(self.nelem, self.nip).map_err(|_| "mask has wrong shape")?;
        for (k, selected) in mask.as_slice().iter().enumerate() {
            if *selected {
                self.kind.as_mut_slice()[k] = Kind::Unset;
                self.index.as_mut_slice()[k] = 0;
            }
        }
        self.compact();
        debug!(npoint = mask.count(), nmaterial = self.points.len(), "unset material");
        Ok(self)
    }

    /// Checks that every point has a material
    pub fn check(&self) -> Result<(), StrError> {
        let nunset = self.kind.as_slice().iter().filter(|k| **k == Kind::Unset).count();
        if nunset > 0 {
            debug!(nunset, npoint = self.kind.len(), "partition check failed");
            return Err("material is not set for every point");
        }
        Ok(())
    }

    /// Computes the stress of every point
    pub fn stress(&self, eps: &Grid<Tensor2>) -> Result<Grid<Tensor2>, StrError> {
        self.evaluate(eps, |p, e| p.calc_stress(e))
    }

    /// Computes the stress and the tangent modulus of every point
    pub fn tangent(&self, eps: &Grid<Tensor2>) -> Result<(Grid<Tensor2>, Grid<Tensor4>), StrError> {
        let both = self.evaluate(eps, |p, e| p.calc_tangent(e))?;
        let (sig, dd): (Vec<Tensor2>, Vec<Tensor4>) = both.into_vec().into_iter().unzip();
        Ok((
            Grid::from_vec(self.nelem, self.nip, sig)?,
            Grid::from_vec(self.nelem, self.nip, dd)?,
        ))
    }

    /// Computes the plastic strain (anchor of the current interval) of every point
    pub fn epsp(&self, eps: &Grid<Tensor2>) -> Result<Grid<f64>, StrError> {
        self.evaluate(eps, |p, e| p.epsp(e))
    }

    /// Computes the index of the current yield interval of every point
    pub fn find(&self, eps: &Grid<Tensor2>) -> Result<Grid<usize>, StrError> {
        self.evaluate(eps, |p, e| p.find(e))
    }

    /// Returns the yield strain at the given index of every point (+∞ for the Elastic potential)
    ///
    /// For instance, `epsy(find(ε))` and `epsy(find(ε) + 1)` are the current yield bounds.
    pub fn epsy(&self, idx: &Grid<usize>) -> Result<Grid<f64>, StrError> {
        self.check()?;
        idx.check_dims(self.nelem, self.nip).map_err(|_| "index grid has wrong shape")?;
        let data = idx
            .as_slice()
            .par_iter()
            .zip(self.index.as_slice().par_iter())
            .map(|(i, k)| self.points[*k].epsy(*i))
            .collect::<Result<Vec<_>, StrError>>()?;
        Grid::from_vec(self.nelem, self.nip, data)
    }

    /// Computes the potential energy of every point
    pub fn energy(&self, eps: &Grid<Tensor2>) -> Result<Grid<f64>, StrError> {
        self.evaluate(eps, |p, e| p.energy(e))
    }

    /// Returns the yield strain bounding the current interval from above (+∞ for the Elastic potential)
    pub fn epsy_pos(&self, eps: &Grid<Tensor2>) -> Result<Grid<f64>, StrError> {
        self.evaluate(eps, |p, e| p.epsy_pos(e))
    }

    /// Returns the yield strain bounding the current interval from below (+∞ for the Elastic potential)
    pub fn epsy_neg(&self, eps: &Grid<Tensor2>) -> Result<Grid<f64>, StrError> {
        self.evaluate(eps, |p, e| p.epsy_neg(e))
    }

    /// Computes the equivalent deviatoric strain εd = √(½ εᵈ:εᵈ) of every point
    pub fn epsd(&self, eps: &Grid<Tensor2>) -> Result<Grid<f64>, StrError> {
        eps.check_dims(self.nelem, self.nip).map_err(|_| "strain grid has wrong shape")?;
        Ok(epsd_grid(eps))
    }

    /// Computes the equivalent deviatoric stress σd = √(2 σᵈ:σᵈ) of every point
    pub fn sigd(&self, sig: &Grid<Tensor2>) -> Result<Grid<f64>, StrError> {
        sig.check_dims(self.nelem, self.nip).map_err(|_| "stress grid has wrong shape")?;
        Ok(sigd_grid(sig))
    }

    /// Applies a per-point function to every point (in parallel)
    fn evaluate<U, F>(&self, eps: &Grid<Tensor2>, f: F) -> Result<Grid<U>, StrError>
    where
        U: Send,
        F: Fn(&MaterialPoint, &Tensor2) -> Result<U, StrError> + Send + Sync,
    {
        self.check()?;
        eps.check_dims(self.nelem, self.nip).map_err(|_| "strain grid has wrong shape")?;
        let data = eps
            .as_slice()
            .par_iter()
            .zip(self.index.as_slice().par_iter())
            .map(|(e, k)| f(&self.points[*k], e))
            .collect::<Result<Vec<_>, StrError>>()?;
        Grid::from_vec(self.nelem, self.nip, data)
    }

    /// Returns a scalar property of every point (NaN if unset)
    fn broadcast_scalar<F>(&self, f: F) -> Grid<f64>
    where
        F: Fn(&MaterialPoint) -> f64,
    {
        let mut res = Grid::new(self.nelem, self.nip, f64::NAN);
        for (k, kind) in self.kind.as_slice().iter().enumerate() {
            if *kind != Kind::Unset {
                res.as_mut_slice()[k] = f(&self.points[self.index.as_slice()[k]]);
            }
        }
        res
    }

    /// Checks the shape of a mask and that the selected points are unset
    fn check_mask(&self, mask: &Grid<bool>) -> Result<(), StrError> {
        mask.check_dims(self.nelem, self.nip).map_err(|_| "mask has wrong shape")?;
        let taken = mask
            .as_slice()
            .iter()
            .zip(self.kind.as_slice())
            .any(|(selected, kind)| *selected && *kind != Kind::Unset);
        if taken {
            return Err("mask selects points that already have a material");
        }
        Ok(())
    }

    /// Assigns one material point per table row to the points selected by the mask
    fn set_table(&mut self, mask: &Grid<bool>, idx: &Grid<usize>, params: &[ParamPotential]) -> Result<&mut Self, StrError> {
        self.check_mask(mask)?;
        idx.check_dims(self.nelem, self.nip).map_err(|_| "index grid has wrong shape")?;
        let out_of_range = mask
            .as_slice()
            .iter()
            .zip(idx.as_slice())
            .any(|(selected, r)| *selected && *r >= params.len());
        if out_of_range {
            return Err("index is out of range of the parameter table");
        }
        let mut table = Vec::with_capacity(params.len());
        for param in params {
            table.push(MaterialPoint::new(param, &self.settings)?);
        }
        let kind = match params.first() {
            Some(param) => param.kind(),
            None => return Err("parameter table must have at least one row"),
        };
        let offset = self.points.len();
        self.points.extend(table);
        for (k, selected) in mask.as_slice().iter().enumerate() {
            if *selected {
                self.kind.as_mut_slice()[k] = kind;
                self.index.as_mut_slice()[k] = offset + idx.as_slice()[k];
            }
        }
        self.compact();
        debug!(
            kind = ?kind,
            nrow = params.len(),
            npoint = mask.count(),
            nmaterial = self.points.len(),
            "set material table"
        );
        Ok(self)
    }

    /// Drops the material points not referenced by any cell and renumbers the cells
    fn compact(&mut self) {
        let mut used = vec![false; self.points.len()];
        for (kind, k) in self.kind.as_slice().iter().zip(self.index.as_slice()) {
            if *kind != Kind::Unset {
                used[*k] = true;
            }
        }
        let mut new_index = vec![0; self.points.len()];
        let mut n = 0;
        for (old, in_use) in used.iter().enumerate() {
            if *in_use {
                new_index[old] = n;
                n += 1;
            }
        }
        for (kind, k) in self.kind.as_slice().iter().zip(self.index.as_mut_slice()) {
            if *kind != Kind::Unset {
                *k = new_index[*k];
            }
        }
        let mut flags = used.into_iter();
        self.points.retain(|_| flags.next().unwrap_or(false));
    }
}

/// Returns the number of rows of a parameter table
fn table_nrow(kk: &Vector, gg: &Vector, epsy: Option<&russell_lab::Matrix>) -> Result<usize, StrError> {
    let nrow = kk.dim();
    if gg.dim() != nrow {
        return Err("parameter tables must have the same number of rows");
    }
    if let Some(epsy) = epsy {
        if epsy.nrow() != nrow {
            return Err("parameter tables must have the same number of rows");
        }
    }
    Ok(nrow)
}

/// Returns a row of the table of yield strains
fn table_row(epsy: &russell_lab::Matrix, r: usize) -> Vec<f64> {
    (0..epsy.ncol()).map(|j| epsy.get(r, j)).collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
