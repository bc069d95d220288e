use crate::models::{Medicine, MedicineCategory};

/// Catalog entries filed under one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryShelf<'a> {
    pub category: MedicineCategory,
    pub medicines: Vec<&'a Medicine>,
}

/// Files medicines under the eight known categories, in their fixed order.
///
/// Every known category gets a shelf even when it is empty. Entries whose category matches
/// none of them go on a trailing `Uncategorized` shelf, which only appears if it has
/// something on it. Within a shelf the input order is kept.
pub fn group_by_category(medicines: &[Medicine]) -> Vec<CategoryShelf<'_>> {
    let mut shelves: Vec<CategoryShelf<'_>> = MedicineCategory::KNOWN
        .into_iter()
        .chain(std::iter::once(MedicineCategory::Uncategorized))
        .map(|category| CategoryShelf {
            category,
            medicines: Vec::new(),
        })
        .collect();

    for medicine in medicines {
        let category = medicine.category();
        if let Some(shelf) = shelves.iter_mut().find(|s| s.category == category) {
            shelf.medicines.push(medicine);
        }
    }

    shelves.retain(|s| s.category != MedicineCategory::Uncategorized || !s.medicines.is_empty());
    shelves
}
