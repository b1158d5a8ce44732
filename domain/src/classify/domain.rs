//! Domain tag - the classification label for a sub-problem.

use crate::core::error::DomainError;
use crate::synthesis::tier::PriorityTier;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classification tag for a sub-problem.
///
/// Variants are declared in priority order (matching each tag's default
/// [`PriorityTier`]), so sorted domain lists and `BTreeMap<Domain, _>`
/// iteration naturally front security and stability work.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Security,
    Infrastructure,
    Database,
    Observability,
    Architecture,
    Api,
    Quality,
    Testing,
    Frontend,
    Performance,
    Documentation,
    Accessibility,
    /// Fallback for problems that match no keyword table entry.
    General,
}

impl Domain {
    pub fn as_str(&self) -> &str {
        match self {
            Domain::Security => "security",
            Domain::Infrastructure => "infrastructure",
            Domain::Database => "database",
            Domain::Observability => "observability",
            Domain::Architecture => "architecture",
            Domain::Api => "api",
            Domain::Quality => "quality",
            Domain::Testing => "testing",
            Domain::Frontend => "frontend",
            Domain::Performance => "performance",
            Domain::Documentation => "documentation",
            Domain::Accessibility => "accessibility",
            Domain::General => "general",
        }
    }

    /// All classifiable domains, in priority order. Excludes the
    /// [`Domain::General`] fallback, which is never keyword-matched.
    pub fn all() -> &'static [Domain] {
        &[
            Domain::Security,
            Domain::Infrastructure,
            Domain::Database,
            Domain::Observability,
            Domain::Architecture,
            Domain::Api,
            Domain::Quality,
            Domain::Testing,
            Domain::Frontend,
            Domain::Performance,
            Domain::Documentation,
            Domain::Accessibility,
        ]
    }

    /// The priority tier this domain's findings default to.
    pub fn priority_tier(&self) -> PriorityTier {
        match self {
            Domain::Security => PriorityTier::Security,
            Domain::Infrastructure | Domain::Database | Domain::Observability => {
                PriorityTier::Stability
            }
            Domain::Architecture | Domain::Api | Domain::Quality | Domain::Testing
            | Domain::Frontend => PriorityTier::Quality,
            Domain::Performance => PriorityTier::Performance,
            Domain::Documentation | Domain::Accessibility | Domain::General => {
                PriorityTier::Enhancement
            }
        }
    }

    /// Reference to the specialist responsible for this domain.
    pub fn specialist_ref(&self) -> String {
        format!("{}-specialist", self.as_str())
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Domain::all()
            .iter()
            .chain(std::iter::once(&Domain::General))
            .find(|d| d.as_str() == normalized)
            .copied()
            .ok_or(DomainError::UnknownDomain(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_matches_declaration_order() {
        let mut domains = vec![Domain::Performance, Domain::Security, Domain::Testing];
        domains.sort();
        assert_eq!(
            domains,
            vec![Domain::Security, Domain::Testing, Domain::Performance]
        );
    }

    #[test]
    fn test_round_trip_parse() {
        for domain in Domain::all() {
            assert_eq!(domain.as_str().parse::<Domain>().unwrap(), *domain);
        }
        assert_eq!("general".parse::<Domain>().unwrap(), Domain::General);
    }

    #[test]
    fn test_unknown_domain() {
        assert!(matches!(
            "astrology".parse::<Domain>(),
            Err(DomainError::UnknownDomain(_))
        ));
    }

    #[test]
    fn test_tier_mapping() {
        assert_eq!(Domain::Security.priority_tier(), PriorityTier::Security);
        assert_eq!(
            Domain::Infrastructure.priority_tier(),
            PriorityTier::Stability
        );
        assert_eq!(Domain::Testing.priority_tier(), PriorityTier::Quality);
        assert_eq!(Domain::General.priority_tier(), PriorityTier::Enhancement);
    }

    #[test]
    fn test_specialist_ref() {
        assert_eq!(Domain::Database.specialist_ref(), "database-specialist");
    }
}
