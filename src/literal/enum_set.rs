use std::fmt;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::core::CoreError;

/// A subset of an enum domain's members. `domain` is the enum type's name
/// (e.g. `"Package"`); two `EnumSet`s can only be combined when their domains
/// match, mirroring the unit check on [`super::QuantitySet`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSet {
    pub domain: SmolStr,
    members: IndexSet<SmolStr>,
}

impl EnumSet {
    pub fn empty(domain: impl Into<SmolStr>) -> Self {
        Self {
            domain: domain.into(),
            members: IndexSet::new(),
        }
    }

    pub fn single(domain: impl Into<SmolStr>, member: impl Into<SmolStr>) -> Self {
        let mut members = IndexSet::new();
        members.insert(member.into());
        Self {
            domain: domain.into(),
            members,
        }
    }

    pub fn from_members(
        domain: impl Into<SmolStr>,
        members: impl IntoIterator<Item = impl Into<SmolStr>>,
    ) -> Self {
        Self {
            domain: domain.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &SmolStr> {
        self.members.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    fn check_domain(&self, other: &EnumSet) -> Result<(), CoreError> {
        if self.domain == other.domain {
            Ok(())
        } else {
            Err(CoreError::unit(format!(
                "mismatched enum domains: {} vs {}",
                self.domain, other.domain
            )))
        }
    }

    pub fn union(&self, other: &EnumSet) -> Result<EnumSet, CoreError> {
        self.check_domain(other)?;
        let mut members = self.members.clone();
        members.extend(other.members.iter().cloned());
        Ok(EnumSet {
            domain: self.domain.clone(),
            members,
        })
    }

    pub fn intersect(&self, other: &EnumSet) -> Result<EnumSet, CoreError> {
        self.check_domain(other)?;
        let members = self.members.intersection(&other.members).cloned().collect();
        Ok(EnumSet {
            domain: self.domain.clone(),
            members,
        })
    }

    pub fn is_subset_of(&self, other: &EnumSet) -> Result<bool, CoreError> {
        self.check_domain(other)?;
        Ok(self.members.is_subset(&other.members))
    }
}

impl fmt::Display for EnumSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.members.iter().map(SmolStr::as_str).collect::<Vec<_>>().join(", ")
        )
    }
}
