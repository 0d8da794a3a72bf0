//! Organisational hierarchy.
//!
//! A [`Department`] holds an ordered list of components, each either a
//! nested department or an employee member. Members are referenced by
//! employee id, so the tree survives registry index shifts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::EmployeeRegistry;

/// One entry in a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgComponent {
    /// A nested unit.
    Unit(Department),
    /// An employee, by id.
    Member(Uuid),
}

/// A named unit of the organisation.
///
/// # Example
///
/// ```
/// use hr_records::org::Department;
/// use uuid::Uuid;
///
/// let mut engineering = Department::new("Engineering");
/// let mut network = Department::new("Network Team");
/// network.add_member(Uuid::new_v4());
/// engineering.add_unit(network);
/// engineering.add_member(Uuid::new_v4());
///
/// assert_eq!(engineering.headcount(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unit name.
    pub name: String,
    components: Vec<OrgComponent>,
}

impl Department {
    /// Creates an empty unit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Appends a nested unit.
    pub fn add_unit(&mut self, unit: Department) {
        self.components.push(OrgComponent::Unit(unit));
    }

    /// Appends an employee member.
    pub fn add_member(&mut self, id: Uuid) {
        self.components.push(OrgComponent::Member(id));
    }

    /// Direct components in insertion order.
    pub fn components(&self) -> &[OrgComponent] {
        &self.components
    }

    /// Number of members in this unit and every unit below it.
    pub fn headcount(&self) -> usize {
        self.components
            .iter()
            .map(|component| match component {
                OrgComponent::Unit(unit) => unit.headcount(),
                OrgComponent::Member(_) => 1,
            })
            .sum()
    }

    /// Removes every occurrence of `id` in the tree. Returns true if any was found.
    pub fn remove_member(&mut self, id: Uuid) -> bool {
        let before = self.components.len();
        self.components
            .retain(|component| !matches!(component, OrgComponent::Member(member) if *member == id));
        let mut removed = self.components.len() != before;

        for component in &mut self.components {
            if let OrgComponent::Unit(unit) = component {
                removed |= unit.remove_member(id);
            }
        }
        removed
    }

    /// Depth-first search for a unit by name, including `self`.
    pub fn find_unit_mut(&mut self, name: &str) -> Option<&mut Department> {
        if self.name == name {
            return Some(self);
        }
        self.components.iter_mut().find_map(|component| match component {
            OrgComponent::Unit(unit) => unit.find_unit_mut(name),
            OrgComponent::Member(_) => None,
        })
    }

    /// Renders the tree with two spaces of indentation per level.
    ///
    /// Members are shown with their name and role label; ids that are no
    /// longer registered show as "(unknown employee)".
    pub fn render(&self, registry: &EmployeeRegistry) -> String {
        let mut lines = Vec::new();
        self.render_into(registry, 0, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, registry: &EmployeeRegistry, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        lines.push(format!("{}+ {} ({})", indent, self.name, self.headcount()));

        for component in &self.components {
            match component {
                OrgComponent::Unit(unit) => unit.render_into(registry, depth + 1, lines),
                OrgComponent::Member(id) => {
                    let label = registry
                        .position_of(*id)
                        .and_then(|index| registry.employee(index).ok())
                        .map(|e| format!("{} [{}]", e.name, e.role_label()))
                        .unwrap_or_else(|| "(unknown employee)".to_string());
                    lines.push(format!("{}  - {}", indent, label));
                }
            }
        }
    }
}
