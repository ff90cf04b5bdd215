//! Header resolution.

use std::collections::BTreeMap;

use csv::StringRecord;

use super::coerce_salary;
use crate::config::columns;
use crate::diagnostic::OrgError;
use crate::model::EmployeeRecord;

/// Where each interpreted column lives in a row.
#[derive(Debug)]
pub(super) struct ColumnLayout {
    width: usize,
    id: usize,
    manager: Option<usize>,
    salary: Option<usize>,
    /// (index, header) of every passthrough column.
    passthrough: Vec<(usize, String)>,
}

impl ColumnLayout {
    /// Resolves column positions from trimmed headers. When a header repeats,
    /// the first occurrence is the one interpreted.
    pub(super) fn from_headers(headers: &StringRecord) -> Result<Self, OrgError> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let id = position(columns::EMPLOYEE_ID).ok_or_else(|| OrgError::MissingColumn {
            column: columns::EMPLOYEE_ID.to_string(),
            found: describe_headers(headers),
        })?;
        let manager = position(columns::MANAGER);
        let salary = position(columns::SALARY);

        let passthrough = headers
            .iter()
            .enumerate()
            .filter(|(index, name)| {
                !name.is_empty() && *index != id && Some(*index) != manager && Some(*index) != salary
            })
            .map(|(index, name)| (index, name.to_string()))
            .collect();

        Ok(Self {
            width: headers.len(),
            id,
            manager,
            salary,
            passthrough,
        })
    }

    /// Number of fields every row must have.
    pub(super) fn width(&self) -> usize {
        self.width
    }

    /// Builds a record from a full-width row; `None` if the id is empty.
    pub(super) fn to_record(&self, row: &StringRecord) -> Option<EmployeeRecord> {
        let id = row.get(self.id).filter(|id| !id.is_empty())?;

        let manager_id = self
            .manager
            .and_then(|index| row.get(index))
            .filter(|manager| !manager.is_empty())
            .map(str::to_string);

        let salary = self
            .salary
            .and_then(|index| row.get(index))
            .map(coerce_salary)
            .unwrap_or(0.0);

        let attributes: BTreeMap<String, String> = self
            .passthrough
            .iter()
            .filter_map(|(index, name)| row.get(*index).map(|value| (name.clone(), value.to_string())))
            .collect();

        Some(EmployeeRecord {
            id: id.to_string(),
            manager_id,
            salary,
            attributes,
        })
    }
}

fn describe_headers(headers: &StringRecord) -> String {
    if headers.is_empty() {
        "(none)".to_string()
    } else {
        headers.iter().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_duplicate_header_wins() {
        let headers = StringRecord::from(vec!["Employee Id", "Salary", "Salary", "Manager"]);
        let layout = ColumnLayout::from_headers(&headers).unwrap();

        let row = StringRecord::from(vec!["E1", "10", "99", ""]);
        let record = layout.to_record(&row).unwrap();
        assert_eq!(record.salary, 10.0);
        assert_eq!(record.attribute("Salary"), Some("99"));
    }

    #[test]
    fn test_unnamed_columns_are_dropped() {
        let headers = StringRecord::from(vec!["Employee Id", ""]);
        let layout = ColumnLayout::from_headers(&headers).unwrap();
        let record = layout.to_record(&StringRecord::from(vec!["E1", "x"])).unwrap();
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let headers = StringRecord::from(vec!["Employee Id", "Manager"]);
        let layout = ColumnLayout::from_headers(&headers).unwrap();
        assert!(layout.to_record(&StringRecord::from(vec!["", "E1"])).is_none());
    }
}
