//! Users page: the `Employee` roster.

use super::Backend;
use super::table::{BulkOutcome, Record, TableView};
use crate::backend::store::{EMPLOYEES, to_fields};
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeForm, EmployeePatch};
use crate::models::position::Status;
use crate::ui::messages::warning;
use crate::utils::ids::display_uid;
use crate::utils::validation::is_valid_email;

impl Record for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Fetch the whole roster. Documents that cannot be read are skipped with a
/// warning.
pub fn fetch_employees(b: &Backend) -> AppResult<Vec<Employee>> {
    let docs = b.store.get_all(EMPLOYEES)?;
    let mut out = Vec::with_capacity(docs.len());

    for doc in docs {
        match doc.decode::<Employee>() {
            Ok(mut e) => {
                e.id = doc.id;
                out.push(e);
            }
            Err(e) => warning(format!("Skipping employee: {e}")),
        }
    }

    Ok(out)
}

pub struct UsersPage<'a> {
    backend: Backend<'a>,
    pub table: TableView<Employee>,
}

impl<'a> UsersPage<'a> {
    pub fn load(backend: Backend<'a>) -> AppResult<Self> {
        let rows = fetch_employees(&backend)?;
        Ok(Self {
            backend,
            table: TableView::new(rows),
        })
    }

    /// Create an employee from the form. The new row is always active and
    /// gets a fresh display uid.
    pub fn add(&mut self, form: EmployeeForm) -> AppResult<Employee> {
        if !is_valid_email(&form.email) {
            return Err(AppError::InvalidEmail(form.email));
        }

        let mut employee = Employee {
            id: String::new(),
            name: form.name,
            email: form.email,
            position: form.position,
            gender: form.gender,
            status: Status::Active,
            uid: Some(display_uid()),
        };

        employee.id = self.backend.store.add(EMPLOYEES, to_fields(&employee)?)?;
        self.table.push(employee.clone());

        let body = format!(
            "Hello {},\n\nyou have been added to PodGuard as {}.",
            employee.name,
            employee.position_str()
        );
        if let Err(e) = self.backend.mailer.send(&employee.email, "Welcome to PodGuard", &body) {
            warning(format!("Welcome email not sent: {e}"));
        }

        audit_quiet(
            self.backend.audit,
            "add",
            &employee.id,
            &format!("Added employee {} <{}>", employee.name, employee.email),
        );
        Ok(employee)
    }

    pub fn update(&mut self, id: &str, patch: EmployeePatch) -> AppResult<()> {
        if self.table.find(id).is_none() {
            return Err(AppError::UnknownEmployee(id.to_string()));
        }
        if let Some(email) = &patch.email
            && !is_valid_email(email)
        {
            return Err(AppError::InvalidEmail(email.clone()));
        }
        if patch.is_empty() {
            return Ok(());
        }

        self.backend.store.update(EMPLOYEES, id, to_fields(&patch)?)?;
        self.table.update(id, |e| patch.apply_to(e));

        audit_quiet(self.backend.audit, "edit", id, "Employee updated");
        Ok(())
    }

    /// Flip active/inactive and return the new status.
    pub fn toggle_status(&mut self, id: &str) -> AppResult<Status> {
        let current = self
            .table
            .find(id)
            .map(|e| e.status)
            .ok_or_else(|| AppError::UnknownEmployee(id.to_string()))?;
        let next = current.toggled();

        let patch = EmployeePatch {
            status: Some(next),
            ..Default::default()
        };
        self.backend.store.update(EMPLOYEES, id, to_fields(&patch)?)?;
        self.table.update(id, |e| e.status = next);

        audit_quiet(
            self.backend.audit,
            "toggle",
            id,
            &format!("Status {current} -> {next}"),
        );
        Ok(next)
    }

    pub fn delete(&mut self, id: &str) -> AppResult<Employee> {
        let removed = self
            .table
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::UnknownEmployee(id.to_string()))?;

        self.backend.store.delete(EMPLOYEES, id)?;
        self.table.remove(id);

        audit_quiet(
            self.backend.audit,
            "del",
            id,
            &format!("Deleted employee {}", removed.name),
        );
        Ok(removed)
    }

    pub fn delete_selected(&mut self) -> BulkOutcome {
        let store = self.backend.store;
        let outcome = self
            .table
            .delete_selected(|id| store.delete(EMPLOYEES, id));

        audit_quiet(
            self.backend.audit,
            "del",
            "Employee",
            &format!(
                "Bulk delete: {} of {} removed",
                outcome.done.len(),
                outcome.requested()
            ),
        );
        outcome
    }
}
