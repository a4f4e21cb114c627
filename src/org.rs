//! Organizational data: roles, reporting lines and teams.
//!
//! The chart ships with the library organization embedded as literals, but a
//! roster can also be supplied as JSON with the same shape.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrgError {
    #[error("duplicate role id: {0}")]
    DuplicateRole(String),
    #[error("role {role} reports to unknown manager id: {manager}")]
    UnknownManager { role: String, manager: String },
    #[error("team {team} references unknown role id: {role}")]
    UnknownTeamRole { team: String, role: String },
}

/// Organizational tier; selects the visual style of the role's node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Dean,
    Manager,
    Coordinator,
    TeamLead,
    Staff,
    Librarian,
}

/// One position in the organization. `person: None` marks the role as vacant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    /// Title, pre-split into the lines it should occupy on the chart.
    pub title: Vec<String>,
    #[serde(default)]
    pub person: Option<String>,
    pub tier: Tier,
    /// Id of the role this one directly reports to, if any.
    #[serde(default)]
    pub manager: Option<String>,
}

impl Role {
    pub fn is_vacant(&self) -> bool {
        self.person.is_none()
    }
}

/// A group of roles drawn inside one bounded cluster. Membership is visual
/// grouping only; it does not imply a reporting edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub note: Option<String>,
    pub lead: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Org {
    pub roles: Vec<Role>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Org {
    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        let org: Org = serde_json::from_str(input)?;
        org.validate()?;
        Ok(org)
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// Referential integrity: unique ids, managers exist, team leads and
    /// members exist. Organizational correctness (cycles, single-manager
    /// rules) is deliberately not checked.
    pub fn validate(&self) -> Result<(), OrgError> {
        let mut seen: Vec<&str> = Vec::new();
        for role in &self.roles {
            if seen.contains(&role.id.as_str()) {
                return Err(OrgError::DuplicateRole(role.id.clone()));
            }
            seen.push(&role.id);
        }
        for role in &self.roles {
            if let Some(manager) = &role.manager
                && self.role(manager).is_none()
            {
                return Err(OrgError::UnknownManager {
                    role: role.id.clone(),
                    manager: manager.clone(),
                });
            }
        }
        for team in &self.teams {
            for id in std::iter::once(&team.lead).chain(team.members.iter()) {
                if self.role(id).is_none() {
                    return Err(OrgError::UnknownTeamRole {
                        team: team.name.clone(),
                        role: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The built-in library organization.
    pub fn library() -> &'static Org {
        &LIBRARY_ORG
    }
}

fn role(
    id: &str,
    title: &[&str],
    person: Option<&str>,
    tier: Tier,
    manager: Option<&str>,
) -> Role {
    Role {
        id: id.to_string(),
        title: title.iter().map(|line| line.to_string()).collect(),
        person: person.map(str::to_string),
        tier,
        manager: manager.map(str::to_string),
    }
}

static LIBRARY_ORG: Lazy<Org> = Lazy::new(|| {
    let mut roles = vec![
        role("amy", &["Interim Dean"], Some("Amy Jiang"), Tier::Dean, None),
        role(
            "wayne",
            &["Executive Assistant &", "Learning Commons Manager"],
            Some("Wayne Thurston"),
            Tier::Manager,
            Some("amy"),
        ),
        role(
            "jennifer",
            &["Head of Collections", "& Scholarship"],
            Some("Jennifer Cady"),
            Tier::Manager,
            Some("amy"),
        ),
        role(
            "keren",
            &["Archives & Special", "Collections Librarian"],
            Some("Keren Darancette"),
            Tier::Coordinator,
            Some("amy"),
        ),
        role(
            "sabrina",
            &["Communications Coord. &", "Interim Makerspace Mgr"],
            Some("Sabrina Mora"),
            Tier::Coordinator,
            Some("amy"),
        ),
        role(
            "bil",
            &["LLC Data Analyst"],
            Some("Bil Owen"),
            Tier::Coordinator,
            Some("amy"),
        ),
        role(
            "law_coord",
            &["Coordinator of Library of", "Law & Public Admin"],
            None,
            Tier::Coordinator,
            Some("amy"),
        ),
        role(
            "karen",
            &["Coordinator, Research", "& Instruction"],
            Some("Karen Beavers"),
            Tier::TeamLead,
            Some("amy"),
        ),
    ];

    for (id, person) in [
        ("linda", "Linda Gordon"),
        ("cathy", "Cathy Johnson"),
        ("liberty", "Liberty McCoy"),
        ("vinaya", "Vinaya Tripuraneni"),
    ] {
        roles.push(role(id, &["R&I Librarian"], Some(person), Tier::Librarian, None));
    }
    roles.push(role("ri_vacant", &["R&I Librarian"], None, Tier::Librarian, None));

    for (id, title, person, manager) in [
        ("ben", "Circulation Supervisor", "Ben Mulchin", "wayne"),
        ("matt", "Circulation Supervisor", "Matt Durian", "wayne"),
        ("marissa", "Weekend Circ. Supervisor", "Marissa Corona", "wayne"),
        ("sean", "Makerspace Manager", "Sean Beslin", "sabrina"),
        ("david", "Law Library Manager", "David Austin", "law_coord"),
    ] {
        roles.push(role(id, &[title], Some(person), Tier::Staff, Some(manager)));
    }

    Org {
        roles,
        teams: vec![Team {
            name: "ri_team".to_string(),
            label: "Research & Instruction Team".to_string(),
            note: Some("All members report directly to Interim Dean".to_string()),
            lead: "karen".to_string(),
            members: vec![
                "linda".to_string(),
                "cathy".to_string(),
                "liberty".to_string(),
                "vinaya".to_string(),
                "ri_vacant".to_string(),
            ],
        }],
    }
});
