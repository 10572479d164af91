//! Remediation plans per fertility class, based on USDA and FAO soil health
//! guidelines.

use crate::types::{FertilityClass, RecommendationRecord};

static LESS_FERTILE: RecommendationRecord = RecommendationRecord {
    title: "Soil Improvement Plan for Less Fertile Soil",
    description: "Your soil requires significant improvements to reach optimal fertility. \
                  Following these USDA and FAO recommended practices will help restore soil \
                  health and productivity.",
    actions: &[
        "Minimize soil disturbance: Reduce or eliminate tillage to preserve soil structure and organic matter",
        "Maximize soil cover: Plant cover crops (like clover, rye, or radishes) to protect soil from erosion and add organic matter",
        "Increase biodiversity: Implement diverse crop rotations including legumes to fix nitrogen naturally",
        "Add organic matter: Apply compost, manure, or other organic amendments to improve soil structure and nutrient content",
        "Balance soil pH: Apply lime if soil is acidic (pH < 6.0) or sulfur if alkaline (pH > 7.5) based on soil test results",
        "Address nutrient deficiencies: Apply targeted fertilizers based on soil test results, focusing on limiting nutrients",
        "Establish living roots: Maintain living plants year-round to support soil biology and nutrient cycling",
        "Implement Integrated Soil Fertility Management (ISFM): Combine organic and inorganic inputs with improved germplasm",
    ],
};

static FERTILE: RecommendationRecord = RecommendationRecord {
    title: "Soil Maintenance Plan for Fertile Soil",
    description: "Your soil is fertile but requires regular maintenance to sustain productivity. \
                  These science-based practices from USDA and FAO will help maintain optimal \
                  soil health.",
    actions: &[
        "Practice crop rotation: Alternate different crop families to break pest cycles and balance nutrient use",
        "Use cover crops strategically: Plant cover crops during fallow periods to maintain soil coverage and add organic matter",
        "Maintain organic matter levels: Add compost or incorporate crop residues to support soil biology",
        "Monitor and maintain pH: Test soil regularly and make small adjustments to keep pH in the optimal range (6.0-7.0)",
        "Practice conservation tillage: Minimize soil disturbance to preserve soil structure and biology",
        "Apply nutrients based on crop removal: Replace only what crops remove to prevent excess or deficiency",
        "Integrate livestock if possible: Managed grazing can improve nutrient cycling and soil biology",
        "Implement buffer strips: Create vegetated areas along water bodies to prevent nutrient runoff",
    ],
};

static HIGHLY_FERTILE: RecommendationRecord = RecommendationRecord {
    title: "Soil Preservation Plan for Highly Fertile Soil",
    description: "Your soil is highly fertile. Focus on preservation and sustainable practices \
                  to maintain this optimal state according to USDA and FAO guidelines.",
    actions: &[
        "Practice precision nutrient management: Apply only what crops need when they need it to prevent excess",
        "Maximize continuous living roots: Use cover crops or perennials to maintain living roots year-round",
        "Implement diverse crop rotations: Include 3+ crop types to maintain biodiversity above and below ground",
        "Monitor soil health indicators: Regularly test organic matter, biological activity, and nutrient levels",
        "Maintain soil coverage: Keep residue on soil surface or living plants growing at all times",
        "Practice no-till or minimal tillage: Avoid disturbing soil structure and biology",
        "Use nutrient budgeting: Track inputs and outputs to maintain balance and prevent accumulation",
        "Implement agroforestry practices: Integrate trees or shrubs if appropriate to enhance biodiversity and soil protection",
    ],
};

/// Static class-to-plan mapping.
pub struct RecommendationCatalog;

impl RecommendationCatalog {
    /// Total over [`FertilityClass`].
    pub fn lookup(class: FertilityClass) -> &'static RecommendationRecord {
        match class {
            FertilityClass::LessFertile => &LESS_FERTILE,
            FertilityClass::Fertile => &FERTILE,
            FertilityClass::HighlyFertile => &HIGHLY_FERTILE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_a_plan() {
        for class in FertilityClass::ALL {
            let rec = RecommendationCatalog::lookup(class);
            assert!(!rec.title.is_empty());
            assert!(!rec.description.is_empty());
            assert_eq!(rec.actions.len(), 8);
            assert!(rec.actions.iter().all(|a| !a.is_empty()));
        }
    }

    #[test]
    fn test_title_matches_class() {
        assert!(RecommendationCatalog::lookup(FertilityClass::LessFertile).title.contains("Less Fertile Soil"));
        assert_eq!(
            RecommendationCatalog::lookup(FertilityClass::Fertile).title,
            "Soil Maintenance Plan for Fertile Soil"
        );
        assert!(RecommendationCatalog::lookup(FertilityClass::HighlyFertile).title.ends_with("Highly Fertile Soil"));
    }

    #[test]
    fn test_descriptions_have_no_layout_whitespace() {
        for class in FertilityClass::ALL {
            assert!(!RecommendationCatalog::lookup(class).description.contains("  "));
        }
    }
}
