//! Raw variable access: values as `f64` arrays and string attributes.

use crate::error::{HovmollerError, Result};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;

/// Read a string attribute, if present and string-typed.
pub(crate) fn string_attr(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute(name)?.value() {
        Ok(AttributeValue::Str(s)) => Some(s),
        _ => None,
    }
}

fn from_vec(shape: &[usize], v: Vec<f64>) -> Result<ArrayD<f64>> {
    ArrayD::from_shape_vec(IxDyn(shape), v)
        .map_err(|e| HovmollerError::NetCdf(format!("invalid shape/data size: {}", e)))
}

macro_rules! read_as_f64 {
    ($var:expr, $shape:expr, $t:ty) => {{
        let values: Vec<$t> = $var
            .get_values(..)
            .map_err(|e| HovmollerError::NetCdf(format!("failed to read '{}': {}", $var.name(), e)))?;
        from_vec($shape, values.into_iter().map(|x| x as f64).collect())
    }};
}

/// Read the full extent of a variable into an `ArrayD<f64>`, widening any
/// supported numeric type.
pub(crate) fn read_values(var: &netcdf::Variable<'_>) -> Result<ArrayD<f64>> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    match var.vartype() {
        NcVariableType::Float(FloatType::F64) => read_as_f64!(var, &shape, f64),
        NcVariableType::Float(FloatType::F32) => read_as_f64!(var, &shape, f32),
        NcVariableType::Int(IntType::I64) => read_as_f64!(var, &shape, i64),
        NcVariableType::Int(IntType::I32) => read_as_f64!(var, &shape, i32),
        NcVariableType::Int(IntType::I16) => read_as_f64!(var, &shape, i16),
        NcVariableType::Int(IntType::I8) => read_as_f64!(var, &shape, i8),
        NcVariableType::Int(IntType::U64) => read_as_f64!(var, &shape, u64),
        NcVariableType::Int(IntType::U32) => read_as_f64!(var, &shape, u32),
        NcVariableType::Int(IntType::U16) => read_as_f64!(var, &shape, u16),
        NcVariableType::Int(IntType::U8) => read_as_f64!(var, &shape, u8),
        other => Err(HovmollerError::NetCdf(format!(
            "variable '{}' has non-numeric type {:?}",
            var.name(),
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_numeric_types_to_f64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.nc");
        {
            let mut file = netcdf::create(&path).unwrap();
            file.add_dimension("n", 3).unwrap();
            let mut counts = file.add_variable::<i32>("counts", &["n"]).unwrap();
            counts.put_values(&[1i32, 2, 3], ..).unwrap();
            let mut level = file.add_variable::<f32>("level", &["n"]).unwrap();
            level.put_values(&[0.5f32, 1.5, 2.5], ..).unwrap();
        }

        let file = netcdf::open(&path).unwrap();
        let counts = read_values(&file.variable("counts").unwrap()).unwrap();
        assert_eq!(counts.shape(), [3usize]);
        assert_eq!(counts[[2]], 3.0);
        let level = read_values(&file.variable("level").unwrap()).unwrap();
        assert_eq!(level[[0]], 0.5);
    }
}
