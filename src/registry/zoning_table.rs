//! Static zoning scheme table.
//!
//! Maps the raw zone labels reported by the town planning scheme layer to
//! planning parameters. Pure configuration data: the lookup never fails,
//! falling back to the conservative `Undetermined` entry for labels the
//! table does not know.

/// Planning parameters for one scheme zone.
#[derive(Debug, Clone, Copy)]
pub struct ZoneParameters {
    pub description: &'static str,
    pub coverage_percent: f64,
    pub far: f64,
    pub height_storeys: u32,
    pub permitted_uses: &'static [&'static str],
    pub density: &'static str,
}

/// Conservative defaults for unrecognized zone labels.
pub const UNDETERMINED: ZoneParameters = ZoneParameters {
    description: "No formal zoning - verify with municipality",
    coverage_percent: 40.0,
    far: 0.5,
    height_storeys: 2,
    permitted_uses: &["Verify"],
    density: "Unknown",
};

/// Known eThekwini scheme zones.
const SCHEME_ZONES: &[(&str, ZoneParameters)] = &[
    (
        "IPTN Residential",
        ZoneParameters {
            description: "Integrated Planning Residential - Medium density",
            coverage_percent: 60.0,
            far: 1.2,
            height_storeys: 3,
            permitted_uses: &["Dwelling", "Townhouses", "Home office"],
            density: "20-40/ha",
        },
    ),
    (
        "IPTN Business",
        ZoneParameters {
            description: "Integrated Planning Business - Mixed use",
            coverage_percent: 80.0,
            far: 2.0,
            height_storeys: 5,
            permitted_uses: &["Retail", "Offices", "Residential"],
            density: "Commercial",
        },
    ),
    (
        "General Residential 1",
        ZoneParameters {
            description: "Low density residential",
            coverage_percent: 50.0,
            far: 0.8,
            height_storeys: 2,
            permitted_uses: &["Dwelling house"],
            density: "1/erf",
        },
    ),
    (
        "General Residential 2",
        ZoneParameters {
            description: "Low-medium density",
            coverage_percent: 55.0,
            far: 1.0,
            height_storeys: 2,
            permitted_uses: &["Dwelling", "Second dwelling"],
            density: "1-2/erf",
        },
    ),
    (
        "General Residential 3",
        ZoneParameters {
            description: "Medium density",
            coverage_percent: 60.0,
            far: 1.4,
            height_storeys: 3,
            permitted_uses: &["Townhouses", "Flats"],
            density: "20-40/ha",
        },
    ),
    (
        "Special Residential",
        ZoneParameters {
            description: "Site-specific density",
            coverage_percent: 50.0,
            far: 1.0,
            height_storeys: 2,
            permitted_uses: &["Dwelling"],
            density: "As specified",
        },
    ),
    (
        "Business 1",
        ZoneParameters {
            description: "General business",
            coverage_percent: 70.0,
            far: 2.0,
            height_storeys: 4,
            permitted_uses: &["Retail", "Offices"],
            density: "Commercial",
        },
    ),
    (
        "Business 2",
        ZoneParameters {
            description: "Mixed use business",
            coverage_percent: 65.0,
            far: 1.8,
            height_storeys: 4,
            permitted_uses: &["Retail", "Residential"],
            density: "Mixed",
        },
    ),
    (
        "Industrial 1",
        ZoneParameters {
            description: "Light industrial",
            coverage_percent: 75.0,
            far: 1.5,
            height_storeys: 3,
            permitted_uses: &["Manufacturing", "Warehouse"],
            density: "Industrial",
        },
    ),
    (
        "Existing Street Reservation",
        ZoneParameters {
            description: "Road reserve - No development",
            coverage_percent: 0.0,
            far: 0.0,
            height_storeys: 0,
            permitted_uses: &["Roads only"],
            density: "None",
        },
    ),
    (
        "Open Space",
        ZoneParameters {
            description: "Parks and recreation",
            coverage_percent: 5.0,
            far: 0.05,
            height_storeys: 1,
            permitted_uses: &["Parks", "Sports"],
            density: "Open",
        },
    ),
    (
        "Public Open Space Reservation",
        ZoneParameters {
            description: "Public open space",
            coverage_percent: 5.0,
            far: 0.05,
            height_storeys: 1,
            permitted_uses: &["Public park"],
            density: "Open",
        },
    ),
    (
        "Market Reservation",
        ZoneParameters {
            description: "Market area",
            coverage_percent: 60.0,
            far: 1.0,
            height_storeys: 2,
            permitted_uses: &["Market"],
            density: "Special",
        },
    ),
    (
        "Agricultural",
        ZoneParameters {
            description: "Agricultural land",
            coverage_percent: 5.0,
            far: 0.1,
            height_storeys: 2,
            permitted_uses: &["Farming"],
            density: "Agricultural",
        },
    ),
];

/// Look up planning parameters for a raw scheme label.
pub fn lookup(label: &str) -> &'static ZoneParameters {
    SCHEME_ZONES
        .iter()
        .find(|(name, _)| *name == label)
        .map_or(&UNDETERMINED, |(_, params)| params)
}
