use std::fmt;

use crate::core::CoreError;
use crate::units::Unit;

use super::interval::Interval;

/// A disjoint union of closed intervals sharing one unit — the
/// `Quantity_Interval_Disjoint` literal kind from spec §3. Invariant:
/// `intervals` is sorted by `min` and no two entries touch (constructors and
/// `union` maintain this by merging on insert).
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySet {
    pub unit: Unit,
    intervals: Vec<Interval>,
}

impl QuantitySet {
    pub fn empty(unit: Unit) -> Self {
        Self {
            unit,
            intervals: Vec::new(),
        }
    }

    pub fn single(unit: Unit, interval: Interval) -> Self {
        Self {
            unit,
            intervals: vec![interval],
        }
    }

    pub fn point(unit: Unit, value: f64) -> Self {
        Self::single(unit, Interval::point(value))
    }

    pub fn from_intervals(unit: Unit, intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut set = Self::empty(unit);
        for interval in intervals {
            set.insert(interval);
        }
        set
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    fn insert(&mut self, interval: Interval) {
        self.intervals.push(interval);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.intervals
            .sort_by(|a, b| a.min.partial_cmp(&b.min).unwrap());
        let mut merged: Vec<Interval> = Vec::with_capacity(self.intervals.len());
        for interval in self.intervals.drain(..) {
            match merged.last_mut() {
                Some(last) if last.touches(&interval) => *last = last.union_touching(&interval),
                _ => merged.push(interval),
            }
        }
        self.intervals = merged;
    }

    fn check_unit(&self, other: &QuantitySet) -> Result<(), CoreError> {
        if self.unit.is_compatible(&other.unit) {
            Ok(())
        } else {
            Err(CoreError::unit(format!(
                "incompatible units: {} vs {}",
                self.unit, other.unit
            )))
        }
    }

    pub fn union(&self, other: &QuantitySet) -> Result<QuantitySet, CoreError> {
        self.check_unit(other)?;
        let mut result = self.clone();
        for interval in &other.intervals {
            result.insert(*interval);
        }
        Ok(result)
    }

    pub fn intersect(&self, other: &QuantitySet) -> Result<QuantitySet, CoreError> {
        self.check_unit(other)?;
        let mut out = Vec::new();
        for a in &self.intervals {
            for b in &other.intervals {
                if let Some(overlap) = a.intersect(b) {
                    out.push(overlap);
                }
            }
        }
        Ok(QuantitySet::from_intervals(self.unit.clone(), out))
    }

    pub fn is_subset_of(&self, other: &QuantitySet) -> Result<bool, CoreError> {
        self.check_unit(other)?;
        Ok(self
            .intervals
            .iter()
            .all(|a| other.intervals.iter().any(|b| a.is_subset_of(b))))
    }

    pub fn min(&self) -> Option<f64> {
        self.intervals.first().map(|i| i.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.intervals.last().map(|i| i.max)
    }

    /// The median of the convex hull of this set, used by the solver's
    /// heuristic `guess` field for a disjoint multi-interval set.
    pub fn hull_midpoint(&self) -> Option<f64> {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            _ => None,
        }
    }

    /// `(center, tolerance)` of this set's convex hull, as the original's
    /// `as_gapless().as_center_tuple(relative)` used for human-readable
    /// value display
    /// (`examples/original_source/src/faebryk/library/has_simple_value_representation.py:115`).
    /// `relative` reports `tolerance` as a fraction of `|center|` (for a
    /// "center ±tolerance%" rendering) rather than in the set's own unit.
    /// `None` for an empty or unbounded set, or a zero center under
    /// `relative` (the fraction is undefined).
    pub fn as_center_tuple(&self, relative: bool) -> Option<(f64, f64)> {
        let min = self.min()?;
        let max = self.max()?;
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let center = (min + max) / 2.0;
        let half_width = (max - min) / 2.0;
        if !relative {
            return Some((center, half_width));
        }
        if center == 0.0 {
            return None;
        }
        Some((center, half_width / center.abs()))
    }

    fn map_intervals(&self, f: impl Fn(&Interval) -> Interval) -> QuantitySet {
        QuantitySet::from_intervals(self.unit.clone(), self.intervals.iter().map(f))
    }

    pub fn add(&self, other: &QuantitySet) -> Result<QuantitySet, CoreError> {
        self.check_unit(other)?;
        let mut out = Vec::new();
        for a in &self.intervals {
            for b in &other.intervals {
                out.push(a.add(b));
            }
        }
        Ok(QuantitySet::from_intervals(self.unit.clone(), out))
    }

    pub fn neg(&self) -> QuantitySet {
        self.map_intervals(Interval::neg)
    }

    pub fn mul(&self, other: &QuantitySet) -> QuantitySet {
        let mut out = Vec::new();
        for a in &self.intervals {
            for b in &other.intervals {
                out.push(a.mul(b));
            }
        }
        QuantitySet::from_intervals(self.unit.mul(&other.unit), out)
    }

    /// `None` if any component interval straddles zero — the solver leaves
    /// such a reciprocal unevaluated rather than erroring, per spec §4.3.
    pub fn recip(&self) -> Option<QuantitySet> {
        let mut out = Vec::with_capacity(self.intervals.len());
        for interval in &self.intervals {
            out.push(interval.recip()?);
        }
        Some(QuantitySet::from_intervals(self.unit.inv(), out))
    }

    pub fn pow(&self, exponent: i32) -> QuantitySet {
        self.map_intervals(|i| i.pow(exponent))
    }

    pub fn log(&self) -> Option<QuantitySet> {
        if !self.unit.dimension.is_dimensionless() {
            return None;
        }
        let mut out = Vec::with_capacity(self.intervals.len());
        for interval in &self.intervals {
            out.push(interval.log()?);
        }
        Some(QuantitySet::from_intervals(self.unit.clone(), out))
    }

    pub fn abs(&self) -> QuantitySet {
        self.map_intervals(Interval::abs)
    }

    pub fn round(&self) -> QuantitySet {
        self.map_intervals(Interval::round)
    }
}

impl QuantitySet {
    /// SI-prefixed display form (`to_si_str`'s convenience, picker/exporter-
    /// facing), each interval rendered with the most compact shared prefix
    /// and the unit symbol appended once rather than per endpoint.
    pub fn to_si_string(&self, num_decimals: usize) -> String {
        if self.is_empty() {
            return "{}".to_string();
        }
        self.intervals
            .iter()
            .map(|i| {
                if i.min == i.max {
                    crate::units::to_si_prefix(i.min, &self.unit, num_decimals)
                } else {
                    format!(
                        "{}..{}",
                        crate::units::to_si_prefix(i.min, &self.unit, num_decimals),
                        crate::units::to_si_prefix(i.max, &self.unit, num_decimals)
                    )
                }
            })
            .collect::<Vec<_>>()
            .join(" ∪ ")
    }
}

impl fmt::Display for QuantitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }
        let parts: Vec<String> = self.intervals.iter().map(|i| i.to_string()).collect();
        write!(f, "{} {}", parts.join(" ∪ "), self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_touching_intervals() {
        let mut set = QuantitySet::single(Unit::ohm(), Interval::new(0.0, 5.0));
        set = set.union(&QuantitySet::single(Unit::ohm(), Interval::new(5.0, 10.0))).unwrap();
        assert_eq!(set.intervals(), &[Interval::new(0.0, 10.0)]);
    }

    #[test]
    fn intersect_across_disjoint_components() {
        let a = QuantitySet::from_intervals(
            Unit::ohm(),
            [Interval::new(0.0, 2.0), Interval::new(8.0, 10.0)],
        );
        let b = QuantitySet::single(Unit::ohm(), Interval::new(1.0, 9.0));
        let result = a.intersect(&b).unwrap();
        assert_eq!(result.intervals(), &[Interval::new(1.0, 2.0), Interval::new(8.0, 9.0)]);
    }

    #[test]
    fn mismatched_units_error() {
        let a = QuantitySet::point(Unit::ohm(), 1.0);
        let b = QuantitySet::point(Unit::volt(), 1.0);
        assert!(a.union(&b).is_err());
    }

    #[test]
    fn to_si_string_formats_a_range_with_one_shared_unit() {
        let set = QuantitySet::single(Unit::ohm(), Interval::new(4700.0, 5000.0));
        assert_eq!(set.to_si_string(2), "4.7kΩ..5kΩ");
        let point = QuantitySet::point(Unit::volt(), 3.3);
        assert_eq!(point.to_si_string(2), "3.3V");
    }

    #[test]
    fn subset_check() {
        let inner = QuantitySet::single(Unit::ohm(), Interval::new(2.0, 4.0));
        let outer = QuantitySet::single(Unit::ohm(), Interval::new(0.0, 10.0));
        assert!(inner.is_subset_of(&outer).unwrap());
        assert!(!outer.is_subset_of(&inner).unwrap());
    }

    #[test]
    fn as_center_tuple_absolute_and_relative() {
        let set = QuantitySet::single(Unit::ohm(), Interval::new(95_000.0, 105_000.0));
        let (center, tolerance) = set.as_center_tuple(false).unwrap();
        assert_eq!(center, 100_000.0);
        assert_eq!(tolerance, 5_000.0);
        let (center, relative_tolerance) = set.as_center_tuple(true).unwrap();
        assert_eq!(center, 100_000.0);
        assert!((relative_tolerance - 0.05).abs() < 1e-9);
    }

    #[test]
    fn as_center_tuple_none_on_unbounded_or_empty() {
        let unbounded = QuantitySet::single(Unit::ohm(), Interval::new(f64::NEG_INFINITY, f64::INFINITY));
        assert_eq!(unbounded.as_center_tuple(false), None);
        let empty = QuantitySet::empty(Unit::ohm());
        assert_eq!(empty.as_center_tuple(false), None);
    }
}
