use super::Kind;
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Holds parameters for the potential of a material point
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum ParamPotential {
    /// Single quadratic potential
    Elastic {
        /// Bulk modulus K
        kk: f64,

        /// Shear modulus G
        gg: f64,
    },

    /// Piecewise quadratic potentials with kinks at the yield strains
    Cusp {
        /// Bulk modulus K
        kk: f64,

        /// Shear modulus G
        gg: f64,

        /// Yield strains (nonnegative and strictly increasing)
        epsy: Vec<f64>,
    },

    /// Piecewise potentials with continuous stress and tangent at the yield strains
    Smooth {
        /// Bulk modulus K
        kk: f64,

        /// Shear modulus G
        gg: f64,

        /// Yield strains (nonnegative and strictly increasing)
        epsy: Vec<f64>,
    },
}

impl ParamPotential {
    /// Returns the kind of potential
    pub fn kind(&self) -> Kind {
        match self {
            ParamPotential::Elastic { .. } => Kind::Elastic,
            ParamPotential::Cusp { .. } => Kind::Cusp,
            ParamPotential::Smooth { .. } => Kind::Smooth,
        }
    }

    /// Checks the parameters
    pub fn validate(&self) -> Result<(), StrError> {
        match self {
            ParamPotential::Elastic { kk, gg } => check_moduli(*kk, *gg),
            ParamPotential::Cusp { kk, gg, epsy } | ParamPotential::Smooth { kk, gg, epsy } => {
                check_moduli(*kk, *gg)?;
                check_yield_strains(epsy)
            }
        }
    }

    /// Parses the parameters from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, StrError> {
        let param: ParamPotential = serde_json::from_str(json).map_err(|_| "cannot parse JSON string")?;
        param.validate()?;
        Ok(param)
    }

    /// Reads a JSON file containing the parameters
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
        let param: ParamPotential = serde_json::from_reader(reader).map_err(|_| "deserialize failed")?;
        param.validate()?;
        Ok(param)
    }
}

/// Checks the bulk modulus K and the shear modulus G
pub fn check_moduli(kk: f64, gg: f64) -> Result<(), StrError> {
    if !(kk > 0.0) || !kk.is_finite() {
        return Err("K must be > 0.0");
    }
    if !(gg > 0.0) || !gg.is_finite() {
        return Err("G must be > 0.0");
    }
    Ok(())
}

/// Checks a (user-provided) sequence of yield strains
///
/// The sequence must have at least two entries, all finite and nonnegative, strictly increasing.
pub fn check_yield_strains(epsy: &[f64]) -> Result<(), StrError> {
    if epsy.len() < 2 {
        return Err("there must be at least two yield strains");
    }
    if epsy.iter().any(|v| !v.is_finite()) {
        return Err("yield strains must be finite");
    }
    if epsy[0] < 0.0 {
        return Err("yield strains must be nonnegative");
    }
    if epsy.windows(2).any(|w| w[1] <= w[0]) {
        return Err("yield strains must be strictly increasing");
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{check_moduli, check_yield_strains, ParamPotential};
    use crate::base::Kind;
    use std::fs;

    #[test]
    fn kind_works() {
        let p = ParamPotential::Elastic { kk: 1.0, gg: 1.0 };
        assert_eq!(p.kind(), Kind::Elastic);
        let p = ParamPotential::Cusp {
            kk: 1.0,
            gg: 1.0,
            epsy: vec![0.1, 0.2],
        };
        assert_eq!(p.kind(), Kind::Cusp);
        let p = ParamPotential::Smooth {
            kk: 1.0,
            gg: 1.0,
            epsy: vec![0.1, 0.2],
        };
        assert_eq!(p.kind(), Kind::Smooth);
    }

    #[test]
    fn check_moduli_captures_errors() {
        assert_eq!(check_moduli(0.0, 1.0).err(), Some("K must be > 0.0"));
        assert_eq!(check_moduli(-1.0, 1.0).err(), Some("K must be > 0.0"));
        assert_eq!(check_moduli(f64::NAN, 1.0).err(), Some("K must be > 0.0"));
        assert_eq!(check_moduli(1.0, 0.0).err(), Some("G must be > 0.0"));
        assert_eq!(check_moduli(1.0, f64::INFINITY).err(), Some("G must be > 0.0"));
        assert_eq!(check_moduli(12.3, 45.6), Ok(()));
    }

    #[test]
    fn check_yield_strains_captures_errors() {
        assert_eq!(
            check_yield_strains(&[]).err(),
            Some("there must be at least two yield strains")
        );
        assert_eq!(
            check_yield_strains(&[0.1]).err(),
            Some("there must be at least two yield strains")
        );
        assert_eq!(
            check_yield_strains(&[0.1, f64::NAN]).err(),
            Some("yield strains must be finite")
        );
        assert_eq!(
            check_yield_strains(&[-0.1, 0.2]).err(),
            Some("yield strains must be nonnegative")
        );
        assert_eq!(
            check_yield_strains(&[0.1, 0.3, 0.3]).err(),
            Some("yield strains must be strictly increasing")
        );
        assert_eq!(
            check_yield_strains(&[0.1, 0.3, 0.2]).err(),
            Some("yield strains must be strictly increasing")
        );
        assert_eq!(check_yield_strains(&[0.0, 0.01, 0.03, 0.10]), Ok(()));
    }

    #[test]
    fn validate_works() {
        let p = ParamPotential::Elastic { kk: -1.0, gg: 1.0 };
        assert_eq!(p.validate().err(), Some("K must be > 0.0"));
        let p = ParamPotential::Smooth {
            kk: 1.0,
            gg: 1.0,
            epsy: vec![0.2, 0.1],
        };
        assert_eq!(p.validate().err(), Some("yield strains must be strictly increasing"));
    }

    #[test]
    fn from_json_str_works() {
        let json = r#"{"Cusp":{"kk":12.3,"gg":45.6,"epsy":[0.01,0.03,0.1]}}"#;
        let p = ParamPotential::from_json_str(json).unwrap();
        assert_eq!(
            p,
            ParamPotential::Cusp {
                kk: 12.3,
                gg: 45.6,
                epsy: vec![0.01, 0.03, 0.1]
            }
        );
        assert_eq!(serde_json::to_string(&p).unwrap(), json);
        assert_eq!(
            ParamPotential::from_json_str("{").err(),
            Some("cannot parse JSON string")
        );
        assert_eq!(
            ParamPotential::from_json_str(r#"{"Elastic":{"kk":12.3,"gg":0.0}}"#).err(),
            Some("G must be > 0.0")
        );
    }

    #[test]
    fn read_json_works() {
        let path = "/tmp/qpot3d/test_param_potential.json";
        fs::create_dir_all("/tmp/qpot3d").unwrap();
        fs::write(path, r#"{"Smooth":{"kk":1.0,"gg":2.0,"epsy":[0.5,1.0]}}"#).unwrap();
        let p = ParamPotential::read_json(path).unwrap();
        assert_eq!(p.kind(), Kind::Smooth);
        assert_eq!(
            ParamPotential::read_json("/tmp/qpot3d/__not_found__.json").err(),
            Some("file not found")
        );
    }
}
