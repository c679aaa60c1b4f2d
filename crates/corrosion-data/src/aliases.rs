// ─────────────────────────────────────────────────────────────────────
// SCPN Corrosion Core — Material Aliases
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Case- and separator-insensitive material name resolution.

/// Normalize a material designation: uppercase, spaces/hyphens/slashes to
/// underscores. "Carbon Steel" and "carbon_steel" normalize identically.
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_ascii_uppercase()
        .replace([' ', '-', '/'], "_")
}

/// Documented alias map, normalized alias → canonical catalog key.
pub const ALIASES: &[(&str, &str)] = &[
    ("316", "SS316"),
    ("316L", "SS316"),
    ("SS_316", "SS316"),
    ("SS316L", "SS316"),
    ("UNS_S31600", "SS316"),
    ("UNS_S31603", "SS316"),
    ("HY_80", "HY80"),
    ("UNS_K31820", "HY80"),
    ("HY_100", "HY100"),
    ("UNS_K32045", "HY100"),
    ("TITANIUM", "Ti"),
    ("TI_GRADE_2", "Ti"),
    ("UNS_R50400", "Ti"),
    ("INCONEL625", "I625"),
    ("INCONEL_625", "I625"),
    ("ALLOY_625", "I625"),
    ("UNS_N06625", "I625"),
    ("CUNI7030", "CuNi"),
    ("CUNI_70_30", "CuNi"),
    ("90_10_CUNI", "CuNi"),
    ("UNS_C71500", "CuNi"),
    ("MILD_STEEL", "carbon_steel"),
    ("CS", "carbon_steel"),
    ("A36", "carbon_steel"),
    ("254_SMO", "254SMO"),
    ("UNS_S31254", "254SMO"),
    ("UNS_S32205", "2205"),
    ("UNS_S32750", "2507"),
];

/// Resolve an alias to its canonical key, if one is mapped.
pub fn alias_target(normalized: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| *canonical)
}
