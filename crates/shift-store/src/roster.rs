//! Employees and the roles they can cover.
//!
//! The roster serializes exactly as the persisted employees document,
//! `{ "list": [...], "initialized": true }`.

use serde::{Deserialize, Serialize};
use shift_engine::{Employee, Role};
use uuid::Uuid;

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRoster {
    #[serde(default)]
    list: Vec<Employee>,
    #[serde(default)]
    initialized: bool,
}

impl EmployeeRoster {
    pub fn new(list: Vec<Employee>, initialized: bool) -> Self {
        Self { list, initialized }
    }

    /// Every employee ever added, including deactivated ones.
    pub fn all(&self) -> &[Employee] {
        &self.list
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.list.iter().find(|e| e.id == id)
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    pub fn active(&self) -> impl Iterator<Item = &Employee> {
        self.list.iter().filter(|e| e.active)
    }

    /// Active employees who hold `role`, in roster order.
    pub fn by_role(&self, role: Role) -> Vec<&Employee> {
        self.active().filter(|e| e.has_role(role)).collect()
    }

    pub fn add(&mut self, name: &str, roles: &[Role]) -> &Employee {
        self.initialized = true;
        self.list.push(Employee {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            roles: dedup(roles),
            active: true,
        });
        &self.list[self.list.len() - 1]
    }

    pub fn update(&mut self, id: &str, name: &str, roles: &[Role]) -> Result<&Employee> {
        let employee = self.get_mut(id)?;
        employee.name = name.trim().to_string();
        employee.roles = dedup(roles);
        Ok(&*employee)
    }

    /// Soft delete: the employee stays resolvable for past rosters.
    pub fn deactivate(&mut self, id: &str) -> Result<&Employee> {
        let employee = self.get_mut(id)?;
        employee.active = false;
        Ok(&*employee)
    }

    pub fn add_role(&mut self, id: &str, role: Role) -> Result<&Employee> {
        let employee = self.get_mut(id)?;
        if !employee.has_role(role) {
            employee.roles.push(role);
        }
        Ok(&*employee)
    }

    pub fn remove_role(&mut self, id: &str, role: Role) -> Result<&Employee> {
        let employee = self.get_mut(id)?;
        employee.roles.retain(|r| *r != role);
        Ok(&*employee)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Employee> {
        self.list
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::EmployeeNotFound(id.to_string()))
    }
}

fn dedup(roles: &[Role]) -> Vec<Role> {
    let mut out: Vec<Role> = Vec::with_capacity(roles.len());
    for role in roles {
        if !out.contains(role) {
            out.push(*role);
        }
    }
    out
}
