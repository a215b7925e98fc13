//! SI unit representation.
//!
//! `original_source/.../libs/units.py` wraps `pint` for this; pint isn't part of
//! any example repo's dependency stack, so this module implements the small
//! slice of unit algebra the solver actually needs: a dimension vector for
//! compatibility checks (`Add` requires matching dimensions; `Multiply`/`Power`
//! combine them), plus SI-prefixed display formatting (`to_si_str` in the
//! original). Quantities are always stored in the unit's base SI magnitude;
//! prefixes are a display-only concern.

use std::fmt;

use smol_str::SmolStr;

/// Exponents of the seven SI base dimensions: (m, kg, s, A, K, mol, cd).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension(pub [i8; 7]);

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension([0; 7]);
    pub const METER: Dimension = Dimension([1, 0, 0, 0, 0, 0, 0]);
    pub const KILOGRAM: Dimension = Dimension([0, 1, 0, 0, 0, 0, 0]);
    pub const SECOND: Dimension = Dimension([0, 0, 1, 0, 0, 0, 0]);
    pub const AMPERE: Dimension = Dimension([0, 0, 0, 1, 0, 0, 0]);
    pub const KELVIN: Dimension = Dimension([0, 0, 0, 0, 1, 0, 0]);
    pub const MOLE: Dimension = Dimension([0, 0, 0, 0, 0, 1, 0]);
    pub const CANDELA: Dimension = Dimension([0, 0, 0, 0, 0, 0, 1]);

    pub fn mul(self, other: Dimension) -> Dimension {
        let mut out = [0i8; 7];
        for i in 0..7 {
            out[i] = self.0[i] + other.0[i];
        }
        Dimension(out)
    }

    pub fn pow(self, exponent: i32) -> Dimension {
        let mut out = [0i8; 7];
        for i in 0..7 {
            out[i] = (self.0[i] as i32 * exponent) as i8;
        }
        Dimension(out)
    }

    pub fn inv(self) -> Dimension {
        self.pow(-1)
    }

    pub fn is_dimensionless(self) -> bool {
        self == Self::DIMENSIONLESS
    }
}

/// A unit: a canonical symbol plus its dimension. Two units are compatible
/// (addable/aliasable) iff their dimensions are equal; the symbol is kept only
/// for display and error messages, matching `HasUnit` in the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    pub symbol: SmolStr,
    pub dimension: Dimension,
}

impl Unit {
    pub fn new(symbol: impl Into<SmolStr>, dimension: Dimension) -> Self {
        Self {
            symbol: symbol.into(),
            dimension,
        }
    }

    pub fn dimensionless() -> Self {
        Self::new("", Dimension::DIMENSIONLESS)
    }

    pub fn volt() -> Self {
        // V = kg * m^2 * s^-3 * A^-1
        Self::new(
            "V",
            Dimension([2, 1, -3, -1, 0, 0, 0]),
        )
    }

    pub fn ampere() -> Self {
        Self::new("A", Dimension::AMPERE)
    }

    pub fn ohm() -> Self {
        // Ω = kg * m^2 * s^-3 * A^-2
        Self::new("Ω", Dimension([2, 1, -3, -2, 0, 0, 0]))
    }

    pub fn farad() -> Self {
        // F = s^4 * A^2 * kg^-1 * m^-2
        Self::new("F", Dimension([-2, -1, 4, 2, 0, 0, 0]))
    }

    pub fn henry() -> Self {
        // H = kg * m^2 * s^-2 * A^-2
        Self::new("H", Dimension([2, 1, -2, -2, 0, 0, 0]))
    }

    pub fn second() -> Self {
        Self::new("s", Dimension::SECOND)
    }

    pub fn hertz() -> Self {
        Self::new("Hz", Dimension::SECOND.inv())
    }

    pub fn kelvin() -> Self {
        Self::new("K", Dimension::KELVIN)
    }

    pub fn meter() -> Self {
        Self::new("m", Dimension::METER)
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Resolve a bare (unprefixed) SI symbol back to its `Unit`, the inverse
    /// of `Display`. Used by the `interchange` feature to reconstruct a
    /// `Unit` from its on-wire symbol string (spec §6). Returns `None` for
    /// symbols not in the small fixed set of named units this crate produces
    /// (compound symbols like `"Ω·s"` from `mul`/`pow` are display-only and
    /// intentionally not parsed back).
    pub fn from_symbol(symbol: &str) -> Option<Unit> {
        Some(match symbol {
            "" => Unit::dimensionless(),
            "V" => Unit::volt(),
            "A" => Unit::ampere(),
            "Ω" => Unit::ohm(),
            "F" => Unit::farad(),
            "H" => Unit::henry(),
            "s" => Unit::second(),
            "Hz" => Unit::hertz(),
            "K" => Unit::kelvin(),
            "m" => Unit::meter(),
            _ => return None,
        })
    }

    pub fn mul(&self, other: &Unit) -> Unit {
        Unit::new(
            format!("{}·{}", self.symbol, other.symbol),
            self.dimension.mul(other.dimension),
        )
    }

    pub fn pow(&self, exponent: i32) -> Unit {
        Unit::new(format!("{}^{}", self.symbol, exponent), self.dimension.pow(exponent))
    }

    pub fn inv(&self) -> Unit {
        self.pow(-1)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// SI magnitude prefixes, used only for display (`to_si_str`).
const PREFIXES: &[(f64, &str)] = &[
    (1e12, "T"),
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Render a value (already in the unit's base SI magnitude) with the most
/// "compact" SI prefix, the way `to_si_str` does in the original — e.g.
/// `to_si_prefix(4700.0, &Unit::ohm())` -> `"4.7kΩ"`.
pub fn to_si_prefix(value: f64, unit: &Unit, num_decimals: usize) -> String {
    if value == 0.0 {
        return format!("0{}", unit.symbol);
    }
    let abs = value.abs();
    let (scale, prefix) = PREFIXES
        .iter()
        .find(|(scale, _)| abs >= *scale)
        .copied()
        .unwrap_or(*PREFIXES.last().unwrap());
    let scaled = value / scale;
    let mut out = format!("{scaled:.num_decimals$}");
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    format!("{out}{prefix}{}", unit.symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volt_times_ampere_is_watt_dimension() {
        let watt_dim = Unit::volt().mul(&Unit::ampere()).dimension;
        // W = kg m^2 s^-3, same as V*A
        assert_eq!(watt_dim, Dimension([2, 1, -3, 0, 0, 0, 0]));
    }

    #[test]
    fn ohm_is_volt_over_ampere() {
        let computed = Unit::volt().mul(&Unit::ampere().inv());
        assert_eq!(computed.dimension, Unit::ohm().dimension);
    }

    #[test]
    fn incompatible_units_detected() {
        assert!(!Unit::volt().is_compatible(&Unit::ohm()));
        assert!(Unit::volt().is_compatible(&Unit::volt()));
    }

    #[test]
    fn si_prefix_formatting() {
        assert_eq!(to_si_prefix(4700.0, &Unit::ohm(), 2), "4.7kΩ");
        assert_eq!(to_si_prefix(0.0047, &Unit::henry(), 2), "4.7mH");
    }

    #[test]
    fn from_symbol_round_trips_named_units() {
        for unit in [Unit::volt(), Unit::ohm(), Unit::farad(), Unit::dimensionless()] {
            assert_eq!(Unit::from_symbol(&unit.symbol), Some(unit));
        }
        assert_eq!(Unit::from_symbol("bogus"), None);
    }
}
