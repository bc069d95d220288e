use super::{AuthoringError, AuthoringResult};
use crate::constants::{DEFAULT_BOTTLE_SIZE, MAIN_SLOT_COUNT};
use crate::models::{
    BunchView, GroupSource, MedicineGroup, Patient, RepeatSource, SubMedicine, Timings,
};
use clinic_types::BottleNumber;
use clinic_uuid::RecordId;

/// One sub-medicine row as shown in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubMedicineRow {
    pub name: String,
    pub reason: String,
    pub show_reason: bool,
    pub is_editing: bool,
}

impl SubMedicineRow {
    /// An empty row, open for typing.
    pub fn blank() -> Self {
        Self {
            is_editing: true,
            ..Self::default()
        }
    }

    /// A filled-in row in view mode.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn from_stored(sub: &SubMedicine) -> Self {
        let reason = sub.reason.clone().unwrap_or_default();
        Self {
            name: sub.name.clone(),
            show_reason: !reason.trim().is_empty(),
            reason,
            is_editing: false,
        }
    }

    fn to_stored(&self) -> SubMedicine {
        let reason = self.reason.trim();
        SubMedicine {
            name: self.name.trim().to_string(),
            reason: (!reason.is_empty()).then(|| reason.to_string()),
        }
    }
}

/// One medicine group ("bottle") being authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDraft {
    pub id: String,
    pub bottle_number: BottleNumber,
    pub bottle_size: String,
    pub source: GroupSource,
    pub rows: Vec<SubMedicineRow>,
    pub timings: Timings,
    pub suggestion: String,
    pub show_suggestion: bool,
}

impl Default for GroupDraft {
    fn default() -> Self {
        Self {
            id: RecordId::new().to_string(),
            bottle_number: BottleNumber::FIRST,
            bottle_size: DEFAULT_BOTTLE_SIZE.to_string(),
            source: GroupSource::Custom,
            rows: Vec::new(),
            timings: Timings::default(),
            suggestion: String::new(),
            show_suggestion: false,
        }
    }
}

impl GroupDraft {
    /// Loads a stored group for editing, keeping its id.
    pub fn from_group(group: &MedicineGroup) -> Self {
        let suggestion = group.suggestion.clone().unwrap_or_default();
        let id = if group.id.trim().is_empty() {
            RecordId::new().to_string()
        } else {
            group.id.clone()
        };
        Self {
            id,
            bottle_number: group.bottle_number.unwrap_or_default(),
            bottle_size: group
                .bottle_size
                .clone()
                .unwrap_or_else(|| DEFAULT_BOTTLE_SIZE.to_string()),
            source: group.main_category.clone(),
            rows: group.sub_medicines.iter().map(SubMedicineRow::from_stored).collect(),
            timings: group.timings.clone(),
            show_suggestion: !suggestion.trim().is_empty(),
            suggestion,
        }
    }

    /// Copies a historical group into a new prescription under a fresh id.
    fn repeated(group: &MedicineGroup) -> Self {
        Self {
            id: RecordId::new().to_string(),
            ..Self::from_group(group)
        }
    }

    /// Switches the group's source and re-seeds its rows.
    ///
    /// "Main" layouts give [`MAIN_SLOT_COUNT`] blank rows in edit mode, a bunch gives one
    /// view-mode row per medicine (none if no bunch has that name), and switching back to
    /// custom keeps whatever rows are there.
    pub fn select_source(&mut self, source: GroupSource, bunches: &[BunchView]) {
        match &source {
            GroupSource::Custom => {}
            GroupSource::Main | GroupSource::Main2 => {
                self.rows = vec![SubMedicineRow::blank(); MAIN_SLOT_COUNT];
            }
            GroupSource::Bunch(name) => {
                self.rows = bunches
                    .iter()
                    .find(|b| b.name.as_str() == name)
                    .map(|b| b.medicine_names().into_iter().map(SubMedicineRow::named).collect())
                    .unwrap_or_default();
            }
        }
        self.source = source;
    }

    fn row_mut(&mut self, index: usize) -> AuthoringResult<&mut SubMedicineRow> {
        let group = self.id.clone();
        self.rows
            .get_mut(index)
            .ok_or(AuthoringError::UnknownRow { group, index })
    }

    /// The group as it will be sent: UI flags dropped, blank text left out.
    pub fn to_group(&self) -> MedicineGroup {
        let suggestion = self.suggestion.trim();
        let bottle_size = self.bottle_size.trim();
        MedicineGroup {
            id: self.id.clone(),
            bottle_number: Some(self.bottle_number),
            bottle_size: (!bottle_size.is_empty()).then(|| bottle_size.to_string()),
            main_category: self.source.clone(),
            sub_medicines: self.rows.iter().map(SubMedicineRow::to_stored).collect(),
            timings: self.timings.clone(),
            suggestion: (!suggestion.is_empty()).then(|| suggestion.to_string()),
        }
    }
}

/// The full list of groups in one prescription.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrescriptionDraft {
    groups: Vec<GroupDraft>,
}

impl PrescriptionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads stored groups for editing. Group ids are kept.
    pub fn from_groups(groups: &[MedicineGroup]) -> Self {
        Self {
            groups: groups.iter().map(GroupDraft::from_group).collect(),
        }
    }

    pub fn groups(&self) -> &[GroupDraft] {
        &self.groups
    }

    /// Appends an empty group (bottle 1, default size, custom source) and returns its id.
    pub fn add_group(&mut self) -> String {
        let group = GroupDraft::default();
        let id = group.id.clone();
        self.groups.push(group);
        id
    }

    pub fn remove_group(&mut self, group_id: &str) -> AuthoringResult<GroupDraft> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| AuthoringError::UnknownGroup(group_id.to_string()))?;
        Ok(self.groups.remove(index))
    }

    pub fn group(&self, group_id: &str) -> AuthoringResult<&GroupDraft> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| AuthoringError::UnknownGroup(group_id.to_string()))
    }

    pub fn group_mut(&mut self, group_id: &str) -> AuthoringResult<&mut GroupDraft> {
        self.groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| AuthoringError::UnknownGroup(group_id.to_string()))
    }

    pub fn select_source(
        &mut self,
        group_id: &str,
        source: GroupSource,
        bunches: &[BunchView],
    ) -> AuthoringResult<()> {
        self.group_mut(group_id)?.select_source(source, bunches);
        Ok(())
    }

    /// Appends a blank row in edit mode. The group's source does not change.
    pub fn add_row(&mut self, group_id: &str) -> AuthoringResult<usize> {
        let group = self.group_mut(group_id)?;
        group.rows.push(SubMedicineRow::blank());
        Ok(group.rows.len() - 1)
    }

    pub fn remove_row(&mut self, group_id: &str, index: usize) -> AuthoringResult<SubMedicineRow> {
        let group = self.group_mut(group_id)?;
        group.row_mut(index)?;
        Ok(group.rows.remove(index))
    }

    pub fn edit_row(
        &mut self,
        group_id: &str,
        index: usize,
        name: impl Into<String>,
    ) -> AuthoringResult<()> {
        self.group_mut(group_id)?.row_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn toggle_editing(&mut self, group_id: &str, index: usize) -> AuthoringResult<bool> {
        let row = self.group_mut(group_id)?.row_mut(index)?;
        row.is_editing = !row.is_editing;
        Ok(row.is_editing)
    }

    pub fn toggle_reason(&mut self, group_id: &str, index: usize) -> AuthoringResult<bool> {
        let row = self.group_mut(group_id)?.row_mut(index)?;
        row.show_reason = !row.show_reason;
        Ok(row.show_reason)
    }

    pub fn set_reason(
        &mut self,
        group_id: &str,
        index: usize,
        reason: impl Into<String>,
    ) -> AuthoringResult<()> {
        self.group_mut(group_id)?.row_mut(index)?.reason = reason.into();
        Ok(())
    }

    pub fn set_timings(&mut self, group_id: &str, timings: Timings) -> AuthoringResult<()> {
        self.group_mut(group_id)?.timings = timings;
        Ok(())
    }

    pub fn set_bottle(
        &mut self,
        group_id: &str,
        number: BottleNumber,
        size: Option<String>,
    ) -> AuthoringResult<()> {
        let group = self.group_mut(group_id)?;
        group.bottle_number = number;
        if let Some(size) = size {
            group.bottle_size = size;
        }
        Ok(())
    }

    pub fn set_suggestion(
        &mut self,
        group_id: &str,
        suggestion: impl Into<String>,
    ) -> AuthoringResult<()> {
        let group = self.group_mut(group_id)?;
        group.suggestion = suggestion.into();
        group.show_suggestion = true;
        Ok(())
    }

    pub fn toggle_suggestion(&mut self, group_id: &str) -> AuthoringResult<bool> {
        let group = self.group_mut(group_id)?;
        group.show_suggestion = !group.show_suggestion;
        Ok(group.show_suggestion)
    }

    /// Replaces every group with a copy of an earlier prescription of `patient`.
    ///
    /// `Fresh` clears the draft. `Initial` copies the intake prescription. A visit date
    /// copies the first follow-up with that date; if there is none the draft is left as it
    /// was and `false` is returned. Copied groups get new ids and their rows are in view
    /// mode. Groups typed before the switch are discarded, not merged.
    pub fn repeat_from(&mut self, source: &RepeatSource, patient: &Patient) -> bool {
        let snapshot = match source {
            RepeatSource::Fresh => {
                self.groups.clear();
                return true;
            }
            RepeatSource::Initial => &patient.medicines,
            RepeatSource::Visit(date) => {
                match patient.follow_ups.iter().find(|f| f.date.as_str() == date) {
                    Some(visit) => &visit.medicines,
                    None => return false,
                }
            }
        };

        self.groups = snapshot.iter().map(GroupDraft::repeated).collect();
        true
    }

    /// The groups as they will be persisted.
    pub fn to_medicines(&self) -> Vec<MedicineGroup> {
        self.groups.iter().map(GroupDraft::to_group).collect()
    }
}
