use crate::models::*;

use super::error::{Result, StoreError};
use super::Store;

impl Store {
    /// Allocation summaries matching `filter`, in document order.
    pub fn list_allocations(&self, filter: &AllocationFilter) -> Result<Vec<AllocationSummary>> {
        let document = self.lock()?;
        Ok(document
            .allocations()
            .iter()
            .filter(|a| filter.matches(a))
            .map(AllocationSummary::from)
            .collect())
    }

    /// The allocation summary and its students, as stored.
    ///
    /// An allocation without a roster entry yields an empty student list.
    pub fn get_roster(&self, id: &AllocationRef) -> Result<Roster> {
        let document = self.lock()?;
        let allocation = document
            .find_allocation(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let students = match document.roster(id) {
            Some(students) => students.to_vec(),
            None => {
                tracing::warn!("No roster loaded for allocation {}, but allocation exists", id);
                Vec::new()
            }
        };

        Ok(Roster {
            info: AllocationSummary::from(&allocation),
            students,
        })
    }

    pub fn login_info(&self) -> Result<LoginInfo> {
        Ok(self.lock()?.login())
    }

    /// Attendance records submitted for a known allocation, oldest first.
    pub fn list_attendance(&self, id: &AllocationRef) -> Result<Vec<AttendanceRecord>> {
        let document = self.lock()?;
        if document.find_allocation(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }

        Ok(document
            .attendance()
            .into_iter()
            .filter(|r| r.allocation_id == *id)
            .collect())
    }

    /// Roster keys that reference no allocation.
    pub fn orphan_roster_keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.orphan_roster_keys())
    }
}
