use serde::{Deserialize, Serialize};

/// Overall condition of the subject property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    PristineOrRecent,
    #[default]
    Good,
    NeedsRefresh,
    NeedsRenovation,
}

impl Condition {
    pub const fn percent(self) -> f64 {
        match self {
            Self::PristineOrRecent => 10.0,
            Self::Good => 0.0,
            Self::NeedsRefresh => -8.0,
            Self::NeedsRenovation => -20.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PristineOrRecent => "pristine / recent",
            Self::Good => "good",
            Self::NeedsRefresh => "needs refresh",
            Self::NeedsRenovation => "needs renovation",
        }
    }
}

/// Energy performance certificate class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyClass {
    A,
    B,
    C,
    #[default]
    D,
    E,
    F,
    G,
    #[serde(rename = "unknown")]
    Unknown,
}

impl EnergyClass {
    pub const fn percent(self) -> f64 {
        match self {
            Self::A => 12.0,
            Self::B => 8.0,
            Self::C => 4.0,
            Self::D => 0.0,
            Self::E => -5.0,
            Self::F => -12.0,
            Self::G => -20.0,
            Self::Unknown => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exposure {
    #[default]
    South,
    Double,
    Triple,
    East,
    West,
    North,
    Other,
}

impl Exposure {
    pub const fn percent(self) -> f64 {
        match self {
            Self::South => 8.0,
            Self::Double => 6.0,
            Self::Triple => 10.0,
            Self::East => 3.0,
            Self::West => 2.0,
            Self::North => -3.0,
            Self::Other => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::South => "south",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::East => "east",
            Self::West => "west",
            Self::North => "north",
            Self::Other => "other",
        }
    }
}

/// Boolean features, listed in audit-trail order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Balcony,
    Terrace,
    Garden,
    Parking,
    Cellar,
    ClearView,
    Quiet,
    NearTransit,
    NearShops,
    RecentRenovation,
    WellMaintainedBuilding,
}

impl Feature {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Balcony,
            Self::Terrace,
            Self::Garden,
            Self::Parking,
            Self::Cellar,
            Self::ClearView,
            Self::Quiet,
            Self::NearTransit,
            Self::NearShops,
            Self::RecentRenovation,
            Self::WellMaintainedBuilding,
        ]
    }

    pub const fn percent(self) -> f64 {
        match self {
            Self::Balcony => 4.0,
            Self::Terrace => 6.0,
            Self::Garden => 8.0,
            Self::Parking => 5.0,
            Self::Cellar => 2.0,
            Self::ClearView => 5.0,
            Self::Quiet => 3.0,
            Self::NearTransit => 4.0,
            Self::NearShops => 3.0,
            Self::RecentRenovation => 7.0,
            Self::WellMaintainedBuilding => 3.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Balcony => "Balcony",
            Self::Terrace => "Terrace",
            Self::Garden => "Garden",
            Self::Parking => "Parking",
            Self::Cellar => "Cellar",
            Self::ClearView => "Clear view",
            Self::Quiet => "Quiet",
            Self::NearTransit => "Near transit",
            Self::NearShops => "Near shops",
            Self::RecentRenovation => "Recent renovation",
            Self::WellMaintainedBuilding => "Well-maintained building",
        }
    }
}

/// Qualitative inputs selected by the user. Percentages are fixed by the
/// catalogue above, never supplied by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitativeAdjustments {
    pub condition: Condition,
    pub energy_class: EnergyClass,
    pub exposure: Exposure,

    pub balcony: bool,
    pub terrace: bool,
    pub garden: bool,
    pub parking: bool,
    pub cellar: bool,

    pub clear_view: bool,
    pub quiet: bool,
    pub near_transit: bool,
    pub near_shops: bool,

    pub recent_renovation: bool,
    pub well_maintained_building: bool,
}

impl Default for QualitativeAdjustments {
    fn default() -> Self {
        Self {
            condition: Condition::Good,
            energy_class: EnergyClass::D,
            exposure: Exposure::South,
            balcony: false,
            terrace: false,
            garden: false,
            parking: false,
            cellar: false,
            clear_view: false,
            quiet: false,
            near_transit: false,
            near_shops: false,
            recent_renovation: false,
            well_maintained_building: false,
        }
    }
}

impl QualitativeAdjustments {
    /// Neutral selection: no factor moves the price.
    pub fn neutral() -> Self {
        Self {
            exposure: Exposure::Other,
            ..Self::default()
        }
    }

    pub fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::Balcony => self.balcony,
            Feature::Terrace => self.terrace,
            Feature::Garden => self.garden,
            Feature::Parking => self.parking,
            Feature::Cellar => self.cellar,
            Feature::ClearView => self.clear_view,
            Feature::Quiet => self.quiet,
            Feature::NearTransit => self.near_transit,
            Feature::NearShops => self.near_shops,
            Feature::RecentRenovation => self.recent_renovation,
            Feature::WellMaintainedBuilding => self.well_maintained_building,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let slot = match feature {
            Feature::Balcony => &mut self.balcony,
            Feature::Terrace => &mut self.terrace,
            Feature::Garden => &mut self.garden,
            Feature::Parking => &mut self.parking,
            Feature::Cellar => &mut self.cellar,
            Feature::ClearView => &mut self.clear_view,
            Feature::Quiet => &mut self.quiet,
            Feature::NearTransit => &mut self.near_transit,
            Feature::NearShops => &mut self.near_shops,
            Feature::RecentRenovation => &mut self.recent_renovation,
            Feature::WellMaintainedBuilding => &mut self.well_maintained_building,
        };
        *slot = enabled;
    }

    pub fn with(mut self, features: &[Feature]) -> Self {
        for feature in features {
            self.set(*feature, true);
        }
        self
    }
}
