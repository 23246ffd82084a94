//! The measurement value type and its conversion.

use serde_json::Value;

use crate::error::UnitError;
use crate::registry::{registry, UnitFamily};

/// A unit-carrying numeric value or range.
///
/// Exactly one of two shapes at a time: a *point* (`value` set, bounds unset)
/// or a *range* (`value` unset, at least one bound set). Both shapes share
/// this one representation; [`Measurement::normalized`] collapses a range
/// with equal bounds back into a point.
///
/// Equality is exact and field-wise — two measurements of the same quantity
/// in different units compare unequal until converted to a common unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    pub value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub unit: String,
    pub unit_type: Option<String>,
    pub standard_deviation: Option<f64>,
    pub replicates: Option<u32>,
}

impl Measurement {
    /// A point measurement.
    pub fn point(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            unit: unit.into(),
            ..Default::default()
        }
    }

    /// A range measurement; either bound may be open.
    pub fn range(min: Option<f64>, max: Option<f64>, unit: impl Into<String>) -> Self {
        Self {
            min_value: min,
            max_value: max,
            unit: unit.into(),
            ..Default::default()
        }
        .normalized()
    }

    /// Build a measurement from a raw scalar as found in historical
    /// documents, via [`min_max`].
    pub fn from_min_max(raw: &Value, unit: impl Into<String>) -> Self {
        let (min, max) = min_max(raw);
        Self {
            min_value: min,
            max_value: max,
            unit: unit.into(),
            ..Default::default()
        }
        .normalized()
    }

    pub fn with_unit_type(mut self, unit_type: impl Into<String>) -> Self {
        self.unit_type = Some(unit_type.into());
        self
    }

    pub fn with_standard_deviation(mut self, sd: f64, replicates: u32) -> Self {
        self.standard_deviation = Some(sd);
        self.replicates = Some(replicates);
        self
    }

    /// True when no value, bound, or unit has been recorded.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Collapse a range with equal bounds into a point.
    pub fn normalized(mut self) -> Self {
        if self.value.is_none() {
            if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
                if min == max {
                    self.value = Some(min);
                    self.min_value = None;
                    self.max_value = None;
                }
            }
        }
        self
    }

    /// Rewrite this measurement into another unit of the same family.
    ///
    /// The family is named by `unit_type`, or inferred from `unit` against
    /// the registry when absent. `value`, `min_value` and `max_value` are
    /// mapped consistently; if the map reverses order (API gravity) the
    /// bounds are swapped back so `min <= max` still holds. The standard
    /// deviation is rescaled through linear maps and dropped through
    /// non-linear ones; `replicates` is carried unchanged.
    pub fn convert(&self, target_unit: &str) -> Result<Measurement, UnitError> {
        let family = self.resolve_family()?;
        let from = family
            .find(&self.unit)
            .ok_or_else(|| self.family_error(family, &self.unit))?;
        let to = family
            .find(target_unit)
            .ok_or_else(|| self.family_error(family, target_unit))?;

        let map = |v: f64| to.conversion.from_base(from.conversion.to_base(v));

        let mut out = Measurement {
            value: self.value.map(map),
            min_value: self.min_value.map(map),
            max_value: self.max_value.map(map),
            unit: target_unit.trim().to_string(),
            unit_type: Some(family.name.to_string()),
            standard_deviation: None,
            replicates: self.replicates,
        };
        if let (Some(a), Some(b)) = (from.conversion.linear_scale(), to.conversion.linear_scale())
        {
            out.standard_deviation = self.standard_deviation.map(|sd| sd * (a / b).abs());
        }
        if let (Some(min), Some(max)) = (out.min_value, out.max_value) {
            if min > max {
                out.min_value = Some(max);
                out.max_value = Some(min);
            }
        }
        Ok(out.normalized())
    }

    fn resolve_family(&self) -> Result<&'static UnitFamily, UnitError> {
        let reg = registry();
        match &self.unit_type {
            Some(name) => reg
                .family(name)
                .ok_or_else(|| UnitError::UnknownFamily(name.clone())),
            None => reg
                .family_of_unit(&self.unit)
                .ok_or_else(|| UnitError::UnknownUnit {
                    unit: self.unit.clone(),
                }),
        }
    }

    /// Unknown-within-family lookup failures distinguish a unit that exists
    /// elsewhere (cross-family conversion attempt) from one nobody knows.
    fn family_error(&self, family: &UnitFamily, unit: &str) -> UnitError {
        if registry().family_of_unit(unit).is_some() {
            UnitError::FamilyMismatch {
                unit: unit.trim().to_string(),
                family: family.name.to_string(),
            }
        } else {
            UnitError::UnknownUnit {
                unit: unit.trim().to_string(),
            }
        }
    }
}

/// Parse a raw document scalar into a `(min, max)` bound pair.
///
/// Accepts a bare number (`5` → `(5, 5)`), a numeric string, or a string
/// with a `<`/`>` prefix denoting an open-ended bound (`"<0.01"` →
/// `(None, 0.01)`). Anything unparsable yields `(None, None)` rather than an
/// error; historical sources are too messy for ingestion to be strict.
pub fn min_max(raw: &Value) -> (Option<f64>, Option<f64>) {
    match raw {
        Value::Number(n) => {
            let v = n.as_f64();
            (v, v)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Some(rest) = s.strip_prefix('<') {
                match rest.trim().parse::<f64>() {
                    Ok(v) => (None, Some(v)),
                    Err(_) => (None, None),
                }
            } else if let Some(rest) = s.strip_prefix('>') {
                match rest.trim().parse::<f64>() {
                    Ok(v) => (Some(v), None),
                    Err(_) => (None, None),
                }
            } else {
                match s.parse::<f64>() {
                    Ok(v) => (Some(v), Some(v)),
                    Err(_) => (None, None),
                }
            }
        }
        _ => (None, None),
    }
}
