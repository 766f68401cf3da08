//! Static submission checklist.

use crate::types::Requirements;

pub fn requirements() -> Requirements {
    Requirements {
        documents: [
            "SANS Forms",
            "Building Plans",
            "Site Plan",
            "Zoning Certificate",
            "Title Deed",
            "SG Diagram",
            "Rates Clearance",
            "Engineer Letter",
        ]
        .map(str::to_string)
        .to_vec(),
        process_steps: ["Submit", "Inspect", "Review", "Approve"]
            .map(str::to_string)
            .to_vec(),
        timeline_weeks: "4-8".to_string(),
        municipal_contact: "eThekwini: (031) 311 1111".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_is_stable() {
        let reqs = requirements();
        assert_eq!(reqs.documents.len(), 8);
        assert_eq!(reqs.process_steps.len(), 4);
        assert_eq!(reqs.timeline_weeks, "4-8");
        assert!(reqs.municipal_contact.contains("eThekwini"));
    }
}
