//! Desired vs. observed planning

use crate::record::{DesiredVSwitch, VSwitch};

/// The remote operation needed to converge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing is tracked (or the tracked vSwitch is gone)
    Create,
    /// Name or VLAN differ from what is declared
    Update { id: u64 },
    /// Observed declared fields already match
    Noop { id: u64 },
}

/// Decide what to do given the declared fields and the latest observation.
///
/// Only `name` and `vlan` take part; derived fields never cause an update.
pub fn plan(desired: &DesiredVSwitch, observed: Option<&VSwitch>) -> Action {
    match observed {
        None => Action::Create,
        Some(current) if current.name != desired.name || current.vlan != desired.vlan => {
            Action::Update { id: current.id }
        }
        Some(current) => Action::Noop { id: current.id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{observed, server};

    #[test]
    fn test_plan_create_when_nothing_observed() {
        assert_eq!(plan(&DesiredVSwitch::new("prod-switch", 4010), None), Action::Create);
    }

    #[test]
    fn test_plan_noop_when_declared_fields_match() {
        let current = observed(7, "prod-switch", 4010);
        assert_eq!(plan(&current.declared(), Some(&current)), Action::Noop { id: 7 });
    }

    #[test]
    fn test_plan_update_on_rename_or_vlan_change() {
        let current = observed(7, "prod-switch", 4010);

        assert_eq!(
            plan(&DesiredVSwitch::new("prod-switch-renamed", 4010), Some(&current)),
            Action::Update { id: 7 }
        );
        assert_eq!(
            plan(&DesiredVSwitch::new("prod-switch", 4011), Some(&current)),
            Action::Update { id: 7 }
        );
    }

    #[test]
    fn test_plan_ignores_derived_fields() {
        let mut current = observed(7, "prod-switch", 4010);
        current.is_cancelled = true;
        current.servers.push(server("10.0.0.5", 5));

        assert_eq!(
            plan(&DesiredVSwitch::new("prod-switch", 4010), Some(&current)),
            Action::Noop { id: 7 }
        );
    }
}
