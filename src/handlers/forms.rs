//! Urlencoded form parsing.
//!
//! Forms arrive as raw key/value pairs so that repeated keys survive: a
//! multi-select posts `employees=2&employees=3` (or `employees[]=...`), and a
//! single selection posts one value. Both end up as a set of ids.

use crate::errors::ServiceError;
use crate::services::{CustomerInput, EmployeeInput};
use std::collections::BTreeSet;
use validator::Validate;

/// Raw form body as submitted.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Every value posted under `name` or `name[]`.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs.iter().filter_map(move |(key, value)| {
            let matches = key == name
                || key
                    .strip_prefix(name)
                    .map_or(false, |rest| rest == "[]");
            matches.then_some(value.as_str())
        })
    }

    /// First value under `name`, trimmed; empty when absent.
    pub fn text(&self, name: &str) -> String {
        self.values(name)
            .next()
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    pub fn integer(&self, name: &str) -> Result<i32, ServiceError> {
        let raw = self.text(name);
        parse_integer(name, &raw)
    }

    /// Distinct integer ids under `name`; blank entries are skipped.
    pub fn integer_set(&self, name: &str) -> Result<BTreeSet<i32>, ServiceError> {
        self.values(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| parse_integer(name, v))
            .collect()
    }
}

fn parse_integer(name: &str, raw: &str) -> Result<i32, ServiceError> {
    raw.parse::<i32>().map_err(|_| {
        ServiceError::ValidationError(format!("{} must be a whole number, got '{}'", name, raw))
    })
}

#[derive(Debug, Clone, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
    pub rating: i32,
    pub company_id: i32,
    pub employee_ids: BTreeSet<i32>,
}

impl CustomerForm {
    pub fn parse(fields: &FormFields) -> Result<Self, ServiceError> {
        let form = Self {
            first_name: fields.text("first_name"),
            last_name: fields.text("last_name"),
            rating: fields.integer("rating")?,
            company_id: fields.integer("company_id")?,
            employee_ids: fields.integer_set("employees")?,
        };
        form.validate()?;
        Ok(form)
    }
}

impl From<CustomerForm> for CustomerInput {
    fn from(form: CustomerForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            rating: form.rating,
            company_id: form.company_id,
            employee_ids: form.employee_ids,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct EmployeeForm {
    #[validate(length(min = 1, max = 100, message = "First name must be 1 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1 to 100 characters"))]
    pub last_name: String,
    pub department_id: i32,
}

impl EmployeeForm {
    pub fn parse(fields: &FormFields) -> Result<Self, ServiceError> {
        let form = Self {
            first_name: fields.text("first_name"),
            last_name: fields.text("last_name"),
            department_id: fields.integer("department_id")?,
        };
        form.validate()?;
        Ok(form)
    }
}

impl From<EmployeeForm> for EmployeeInput {
    fn from(form: EmployeeForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            department_id: form.department_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn customer_form_collects_distinct_employees() {
        let form = CustomerForm::parse(&fields(&[
            ("first_name", "A"),
            ("last_name", "B"),
            ("rating", "3"),
            ("company_id", "1"),
            ("employees", "3"),
            ("employees[]", "2"),
            ("employees", "3"),
        ]))
        .unwrap();

        assert_eq!(form.employee_ids, BTreeSet::from([2, 3]));
        assert_eq!(form.rating, 3);
        assert_eq!(form.company_id, 1);
    }

    #[test]
    fn single_or_missing_employee_selection() {
        let base = [
            ("first_name", "A"),
            ("last_name", "B"),
            ("rating", "3"),
            ("company_id", "1"),
        ];
        let none = CustomerForm::parse(&fields(&base)).unwrap();
        assert!(none.employee_ids.is_empty());

        let mut one = base.to_vec();
        one.push(("employees", "4"));
        let one = CustomerForm::parse(&fields(&one)).unwrap();
        assert_eq!(one.employee_ids, BTreeSet::from([4]));
    }

    #[test]
    fn similar_keys_are_not_employees() {
        let f = fields(&[("employees_extra", "9"), ("employees[]", "1")]);
        assert_eq!(f.integer_set("employees").unwrap(), BTreeSet::from([1]));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert_matches!(
            CustomerForm::parse(&fields(&[
                ("first_name", "A"),
                ("last_name", "B"),
                ("rating", "three"),
                ("company_id", "1"),
            ])),
            Err(ServiceError::ValidationError(_))
        );
        assert_matches!(
            CustomerForm::parse(&fields(&[
                ("first_name", "A"),
                ("last_name", "B"),
                ("rating", "3"),
                ("company_id", "1"),
                ("employees", "x"),
            ])),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn names_are_required_and_bounded() {
        assert_matches!(
            CustomerForm::parse(&fields(&[
                ("first_name", "  "),
                ("last_name", "B"),
                ("rating", "3"),
                ("company_id", "1"),
            ])),
            Err(ServiceError::ValidationError(_))
        );

        let long = "x".repeat(101);
        assert_matches!(
            EmployeeForm::parse(&fields(&[
                ("first_name", "A"),
                ("last_name", long.as_str()),
                ("department_id", "1"),
            ])),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn employee_form_parses() {
        let form = EmployeeForm::parse(&fields(&[
            ("first_name", " Grace "),
            ("last_name", "Hopper"),
            ("department_id", "2"),
        ]))
        .unwrap();
        assert_eq!(form.first_name, "Grace");
        assert_eq!(form.department_id, 2);
    }
}
