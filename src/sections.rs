//! Static grouping of parameter keys into editor sections.
//!
//! An inspector UI can use this to lay out `TerrainParameters` fields without
//! inspecting the type at runtime. Keys are the serialized field names.

/// Editor section a parameter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    MapSize,
    TerrainPattern,
    RegionsColours,
    Height,
    Seed,
    Defaults,
}

impl Section {
    /// All sections in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::MapSize,
            Self::TerrainPattern,
            Self::RegionsColours,
            Self::Height,
            Self::Seed,
            Self::Defaults,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MapSize => "Map Size & Detail",
            Self::TerrainPattern => "Terrain Pattern",
            Self::RegionsColours => "Regions & Colours",
            Self::Height => "Height",
            Self::Seed => "Seed",
            Self::Defaults => "Defaults",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Every parameter key with its section, in display order.
pub const PARAMETER_SECTIONS: &[(&str, Section)] = &[
    ("width", Section::MapSize),
    ("height", Section::MapSize),
    ("noise_scale", Section::MapSize),
    ("octaves", Section::TerrainPattern),
    ("persistence", Section::TerrainPattern),
    ("lacunarity", Section::TerrainPattern),
    ("offset", Section::TerrainPattern),
    ("region_band_count", Section::RegionsColours),
    ("region_thresholds", Section::RegionsColours),
    ("region_colours", Section::RegionsColours),
    ("region_ramp", Section::RegionsColours),
    ("reverse_ramp", Section::RegionsColours),
    ("block_size", Section::RegionsColours),
    ("quantization_mode", Section::Height),
    ("height_exponent", Section::Height),
    ("height_multiplier", Section::Height),
    ("height_curve", Section::Height),
    ("use_defaults", Section::Seed),
    ("seed", Section::Seed),
    ("defaults", Section::Defaults),
];

pub fn section_for(key: &str) -> Option<Section> {
    PARAMETER_SECTIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, section)| section)
}

/// Sections in display order, each with its keys. Empty sections are skipped.
pub fn grouped() -> Vec<(Section, Vec<&'static str>)> {
    Section::all()
        .iter()
        .map(|&section| {
            let keys = PARAMETER_SECTIONS
                .iter()
                .filter(|(_, s)| *s == section)
                .map(|&(k, _)| k)
                .collect::<Vec<_>>();
            (section, keys)
        })
        .filter(|(_, keys)| !keys.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TerrainParameters;

    #[test]
    fn test_lookup() {
        assert_eq!(section_for("octaves"), Some(Section::TerrainPattern));
        assert_eq!(section_for("seed"), Some(Section::Seed));
        assert_eq!(section_for("nope"), None);
    }

    #[test]
    fn test_every_serialized_field_has_a_section() {
        let value = serde_json::to_value(TerrainParameters::default()).unwrap();
        let fields = value.as_object().unwrap();
        for key in fields.keys() {
            assert!(section_for(key).is_some(), "no section for {}", key);
        }
        assert_eq!(fields.len(), PARAMETER_SECTIONS.len());
    }

    #[test]
    fn test_grouped_order() {
        let groups = grouped();
        assert_eq!(groups[0].0, Section::MapSize);
        assert_eq!(groups[0].1, vec!["width", "height", "noise_scale"]);
        assert_eq!(groups.last().unwrap().0, Section::Defaults);
    }
}
