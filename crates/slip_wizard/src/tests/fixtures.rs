use crate::catalog::Catalog;

pub(crate) fn sample_catalog() -> Catalog {
    serde_json::from_value(serde_json::json!({
        "labs": [
            { "lab_id": "L1", "name": "Northside Dental Lab" },
            { "lab_id": "L2", "name": "Harbor Ceramics" }
        ],
        "doctors": [
            { "doctor_id": "D1", "name": "Dr. Alvarez", "lab_id": "L1" },
            { "doctor_id": "D2", "name": "Dr. Brooks" }
        ],
        "categories": [
            {
                "category_id": "crowns",
                "name": "Crowns",
                "subcategories": [
                    {
                        "subcategory_id": "zirconia",
                        "name": "Zirconia",
                        "products": [{ "product_id": "full-contour", "name": "Full Contour" }]
                    },
                    {
                        "subcategory_id": "emax",
                        "name": "e.max",
                        "products": [{ "product_id": "layered", "name": "Layered" }]
                    }
                ]
            },
            {
                "category_id": "dentures",
                "name": "Dentures",
                "subcategories": [
                    {
                        "subcategory_id": "acrylic",
                        "name": "Acrylic",
                        "products": [{ "product_id": "complete", "name": "Complete Denture" }]
                    }
                ]
            }
        ],
        "stages": [
            { "stage_id": "extraction", "name": "Extraction" },
            { "stage_id": "impression", "name": "Impression" },
            { "stage_id": "shade", "name": "Shade" }
        ]
    }))
    .expect("sample catalog")
}

