//! The process-wide unit-family registry.
//!
//! One [`UnitFamily`] per `unit_type` string, each mapping unit names (and
//! spelling aliases) to a [`Conversion`] into the family's base unit. The
//! registry is built once on first use and read-only afterwards; batch
//! workers may share it freely.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Density of fresh water at 60 °F in kg/m³, the reference point for API
/// gravity.
const WATER_DENSITY_60F: f64 = 999.016;

const API_OFFSET: f64 = 131.5;
const API_SCALE: f64 = 141.5 * WATER_DENSITY_60F;

static LEGACY_KELVIN: AtomicBool = AtomicBool::new(false);

/// Which Celsius↔Kelvin offset constant conversions use.
///
/// Historical data sources disagree on the constant; the choice is
/// process-wide configuration, never per-value state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KelvinOffset {
    /// 273.15, the modern constant.
    Standard,
    /// 273.16, carried by older archives.
    Legacy,
}

impl KelvinOffset {
    pub fn constant(self) -> f64 {
        match self {
            KelvinOffset::Standard => 273.15,
            KelvinOffset::Legacy => 273.16,
        }
    }
}

/// Select the Celsius↔Kelvin offset constant for the whole process.
pub fn set_kelvin_offset(offset: KelvinOffset) {
    LEGACY_KELVIN.store(offset == KelvinOffset::Legacy, Ordering::Relaxed);
}

/// The currently selected Celsius↔Kelvin offset.
pub fn kelvin_offset() -> KelvinOffset {
    if LEGACY_KELVIN.load(Ordering::Relaxed) {
        KelvinOffset::Legacy
    } else {
        KelvinOffset::Standard
    }
}

/// How one unit maps onto its family's base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// `base = scale * v`.
    Scale(f64),
    /// `base = scale * v + offset`.
    Affine { scale: f64, offset: f64 },
    /// Celsius→Kelvin; the offset is read from the process-wide flag at
    /// conversion time so the registry itself stays immutable.
    Celsius,
    /// API gravity↔density: `base = k / (v + 131.5)`. Order-reversing.
    ApiGravity,
}

impl Conversion {
    pub fn to_base(&self, v: f64) -> f64 {
        match self {
            Conversion::Scale(scale) => scale * v,
            Conversion::Affine { scale, offset } => scale * v + offset,
            Conversion::Celsius => v + kelvin_offset().constant(),
            Conversion::ApiGravity => API_SCALE / (v + API_OFFSET),
        }
    }

    pub fn from_base(&self, base: f64) -> f64 {
        match self {
            Conversion::Scale(scale) => base / scale,
            Conversion::Affine { scale, offset } => (base - offset) / scale,
            Conversion::Celsius => base - kelvin_offset().constant(),
            Conversion::ApiGravity => API_SCALE / base - API_OFFSET,
        }
    }

    /// The local scale factor into the base unit where the map is linear;
    /// `None` for non-linear maps, through which spreads cannot be carried.
    pub fn linear_scale(&self) -> Option<f64> {
        match self {
            Conversion::Scale(scale) => Some(*scale),
            Conversion::Affine { scale, .. } => Some(*scale),
            Conversion::Celsius => Some(1.0),
            Conversion::ApiGravity => None,
        }
    }
}

/// One unit inside a family: canonical name, accepted spellings, conversion.
#[derive(Debug, Clone)]
pub struct UnitDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub conversion: Conversion,
}

impl UnitDef {
    fn matches(&self, wanted: &str) -> bool {
        let wanted = wanted.trim();
        self.name.eq_ignore_ascii_case(wanted)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(wanted))
    }
}

/// A named group of mutually convertible units.
#[derive(Debug, Clone)]
pub struct UnitFamily {
    pub name: &'static str,
    pub units: Vec<UnitDef>,
}

impl UnitFamily {
    /// Look up a unit by canonical name or alias, case-insensitively.
    pub fn find(&self, unit: &str) -> Option<&UnitDef> {
        self.units.iter().find(|u| u.matches(unit))
    }
}

/// All unit families, keyed by `unit_type` name.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    families: Vec<UnitFamily>,
}

impl UnitRegistry {
    pub fn family(&self, name: &str) -> Option<&UnitFamily> {
        let name = name.trim();
        self.families
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Infer the family of a bare unit string: the first family that knows
    /// the unit, in declaration order.
    pub fn family_of_unit(&self, unit: &str) -> Option<&UnitFamily> {
        self.families.iter().find(|f| f.find(unit).is_some())
    }

    pub fn families(&self) -> &[UnitFamily] {
        &self.families
    }
}

fn unit(name: &'static str, aliases: &'static [&'static str], conversion: Conversion) -> UnitDef {
    UnitDef {
        name,
        aliases,
        conversion,
    }
}

fn scale(name: &'static str, aliases: &'static [&'static str], factor: f64) -> UnitDef {
    unit(name, aliases, Conversion::Scale(factor))
}

fn build_registry() -> UnitRegistry {
    let families = vec![
        UnitFamily {
            name: "temperature",
            units: vec![
                scale("K", &["kelvin"], 1.0),
                unit("C", &["°C", "celsius"], Conversion::Celsius),
                unit(
                    "F",
                    &["°F", "fahrenheit"],
                    Conversion::Affine {
                        scale: 5.0 / 9.0,
                        offset: 459.67 * 5.0 / 9.0,
                    },
                ),
            ],
        },
        UnitFamily {
            name: "density",
            units: vec![
                scale("kg/m^3", &["kg/m3", "kg m-3"], 1.0),
                scale("g/cm^3", &["g/cm3", "g/cc"], 1000.0),
                scale("g/mL", &["g/ml"], 1000.0),
                unit("API", &["deg API", "api gravity"], Conversion::ApiGravity),
            ],
        },
        UnitFamily {
            name: "massfraction",
            units: vec![
                scale("fraction", &["1", "mass fraction"], 1.0),
                scale("%", &["percent"], 0.01),
                scale("ppm", &["mg/kg"], 1e-6),
                scale("g/kg", &["mg/g"], 1e-3),
            ],
        },
        UnitFamily {
            name: "volumefraction",
            units: vec![
                scale("fraction", &["1", "volume fraction"], 1.0),
                scale("%", &["percent"], 0.01),
                scale("ppm", &["uL/L"], 1e-6),
                scale("mL/L", &["ml/l"], 1e-3),
            ],
        },
        UnitFamily {
            name: "dynamicviscosity",
            units: vec![
                scale("Pa.s", &["Pa s", "Pas"], 1.0),
                scale("mPa.s", &["mPa s"], 1e-3),
                scale("cP", &["centipoise"], 1e-3),
                scale("P", &["poise"], 0.1),
            ],
        },
        UnitFamily {
            name: "kinematicviscosity",
            units: vec![
                scale("m^2/s", &["m2/s"], 1.0),
                scale("mm^2/s", &["mm2/s"], 1e-6),
                scale("cSt", &["centistoke"], 1e-6),
                scale("St", &["stoke"], 1e-4),
            ],
        },
        UnitFamily {
            name: "interfacialtension",
            units: vec![
                scale("N/m", &[], 1.0),
                scale("mN/m", &[], 1e-3),
                scale("dyne/cm", &["dyn/cm"], 1e-3),
            ],
        },
        UnitFamily {
            name: "pressure",
            units: vec![
                scale("Pa", &["pascal"], 1.0),
                scale("kPa", &[], 1e3),
                scale("MPa", &[], 1e6),
                scale("bar", &[], 1e5),
                scale("psi", &[], 6894.757293168),
            ],
        },
        UnitFamily {
            name: "mass",
            units: vec![
                scale("kg", &["kilogram"], 1.0),
                scale("g", &["gram"], 1e-3),
                scale("mg", &[], 1e-6),
                scale("ton", &["tonne", "metric ton"], 1e3),
                scale("lb", &["pound"], 0.45359237),
            ],
        },
        UnitFamily {
            name: "length",
            units: vec![
                scale("m", &["meter"], 1.0),
                scale("cm", &[], 1e-2),
                scale("mm", &[], 1e-3),
                scale("km", &[], 1e3),
                scale("in", &["inch"], 0.0254),
                scale("ft", &["foot", "feet"], 0.3048),
            ],
        },
    ];
    UnitRegistry { families }
}

/// The shared registry, built on first use and immutable afterwards.
pub fn registry() -> &'static UnitRegistry {
    static REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}
