use crate::base::{t2_from_array, t2_to_array, Array2, Grid, ParamPotential, Settings};
use crate::material::Matrix;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use russell_tensor::Tensor2;
use std::path::Path;

/// Holds the material assigned to a set of elements (all integration points)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMaterial {
    pub elements: Vec<usize>,
    pub param: ParamPotential,
}

/// Holds reference results for comparisons and tests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub nelem: usize,
    pub nip: usize,
    pub settings: Settings,
    pub materials: Vec<ReferenceMaterial>,
    pub strain: Vec<Vec<Array2>>, // [nelem][nip][3][3]
    pub stress: Vec<Vec<Array2>>, // [nelem][nip][3][3]
    pub epsp: Vec<Vec<f64>>,      // [nelem][nip]
    pub find: Vec<Vec<usize>>,    // [nelem][nip]
    pub energy: Vec<Vec<f64>>,    // [nelem][nip]
}

impl ReferenceData {
    /// Allocates a new instance by evaluating a matrix configured with the given materials
    pub fn generate(
        nelem: usize,
        nip: usize,
        settings: &Settings,
        materials: Vec<ReferenceMaterial>,
        strain: Vec<Vec<Array2>>,
    ) -> Result<Self, StrError> {
        let mut data = ReferenceData {
            nelem,
            nip,
            settings: *settings,
            materials,
            strain,
            stress: Vec::new(),
            epsp: Vec::new(),
            find: Vec::new(),
            energy: Vec::new(),
        };
        let mat = data.matrix()?;
        let eps = data.strain_grid()?;
        data.stress = mat.stress(&eps)?.map(t2_to_array).to_rows();
        data.epsp = mat.epsp(&eps)?.to_rows();
        data.find = mat.find(&eps)?.to_rows();
        data.energy = mat.energy(&eps)?.to_rows();
        Ok(data)
    }

    /// Allocates the matrix described by the materials
    pub fn matrix(&self) -> Result<Matrix, StrError> {
        let mut mat = Matrix::new_with(self.nelem, self.nip, &self.settings);
        for material in &self.materials {
            let mask = Grid::mask_elements(self.nelem, self.nip, &material.elements)?;
            mat.set_param(&mask, &material.param)?;
        }
        mat.check()?;
        Ok(mat)
    }

    /// Returns the strain grid
    pub fn strain_grid(&self) -> Result<Grid<Tensor2>, StrError> {
        let eps = Grid::from_rows(&self.strain)?;
        eps.check_dims(self.nelem, self.nip)
            .map_err(|_| "strain data has wrong shape")?;
        eps.try_map(t2_from_array)
    }

    /// Returns the stress grid
    pub fn stress_grid(&self) -> Result<Grid<Tensor2>, StrError> {
        let sig = Grid::from_rows(&self.stress)?;
        sig.check_dims(self.nelem, self.nip)
            .map_err(|_| "stress data has wrong shape")?;
        sig.try_map(t2_from_array)
    }

    /// Reads a JSON file containing the results
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "file not found")?;
        let reader = BufReader::new(file);
        let data = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        Ok(data)
    }

    /// Writes a JSON file with the results
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
