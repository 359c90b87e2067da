//! Already-fetched option lists the wizard steps choose from.

use serde::{Deserialize, Serialize};
use shared::domain::{
    CategoryId, CategorySummary, DoctorId, DoctorSummary, LabId, LabSummary, ProductId,
    ProductSummary, StageId, StageSummary, SubcategoryId, SubcategorySummary,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub labs: Vec<LabSummary>,
    #[serde(default)]
    pub doctors: Vec<DoctorSummary>,
    #[serde(default)]
    pub categories: Vec<CategorySummary>,
    #[serde(default)]
    pub stages: Vec<StageSummary>,
}

impl Catalog {
    pub fn offers_lab(&self, lab_id: &LabId) -> bool {
        self.labs.iter().any(|lab| &lab.lab_id == lab_id)
    }

    /// A doctor tied to a lab is only offered once that lab is selected.
    pub fn offers_doctor(&self, doctor_id: &DoctorId, selected_lab: Option<&LabId>) -> bool {
        self.doctors.iter().any(|doctor| {
            &doctor.doctor_id == doctor_id
                && match (&doctor.lab_id, selected_lab) {
                    (Some(works_with), Some(selected)) => works_with == selected,
                    _ => true,
                }
        })
    }

    pub fn category(&self, category_id: &CategoryId) -> Option<&CategorySummary> {
        self.categories
            .iter()
            .find(|category| &category.category_id == category_id)
    }

    pub fn subcategory_of(
        &self,
        category_id: &CategoryId,
        subcategory_id: &SubcategoryId,
    ) -> Option<&SubcategorySummary> {
        self.category(category_id)?
            .subcategories
            .iter()
            .find(|sub| &sub.subcategory_id == subcategory_id)
    }

    pub fn product_of(
        &self,
        category_id: &CategoryId,
        subcategory_id: &SubcategoryId,
        product_id: &ProductId,
    ) -> Option<&ProductSummary> {
        self.subcategory_of(category_id, subcategory_id)?
            .products
            .iter()
            .find(|product| &product.product_id == product_id)
    }

    pub fn offers_stage(&self, stage_id: &StageId) -> bool {
        self.stages.iter().any(|stage| &stage.stage_id == stage_id)
    }

    /// The only subcategory of `category_id`, when it has exactly one.
    pub fn sole_subcategory(&self, category_id: &CategoryId) -> Option<&SubcategorySummary> {
        match self.category(category_id)?.subcategories.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
