use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier attached to a comparable by the session that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparableId(pub String);

impl ComparableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    #[default]
    Apartment,
    House,
    Land,
    Building,
    CommercialPremises,
    ParkingGarage,
}

impl PropertyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Land => "Land",
            Self::Building => "Building",
            Self::CommercialPremises => "Commercial premises",
            Self::ParkingGarage => "Parking/Garage",
        }
    }
}

/// Subject property. Only `area` takes part in the arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyAttributes {
    pub estimation_name: String,
    pub valuation_date: Option<NaiveDate>,
    pub kind: PropertyKind,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    /// Floor area in square metres.
    pub area: f64,
    pub rooms: u32,
    pub bedrooms: u32,
    pub floor: i32,
    pub elevator: bool,
    pub construction_year: u16,
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self {
            estimation_name: String::new(),
            valuation_date: None,
            kind: PropertyKind::Apartment,
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            area: 50.0,
            rooms: 3,
            bedrooms: 2,
            floor: 2,
            elevator: false,
            construction_year: 2000,
        }
    }
}

/// Registered sale (notarial / land registry transaction).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default)]
    pub id: ComparableId,
    pub price: f64,
    pub area: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub comment: String,
}

/// Asking price published on a listing site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(default)]
    pub id: ComparableId,
    pub price: f64,
    pub area: f64,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub comment: String,
}

/// Price range quoted by an agency or an online estimator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyEstimate {
    #[serde(default)]
    pub id: ComparableId,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub comment: String,
}

impl AgencyEstimate {
    pub fn midpoint(&self) -> f64 {
        (self.min_price + self.max_price) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Sales,
    Listings,
    Estimates,
}

impl SourceCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Sales, Self::Listings, Self::Estimates]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Listings => "Listings",
            Self::Estimates => "Estimates",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ComparableRecord {
    Sale(SaleRecord),
    Listing(ListingRecord),
    Estimate(AgencyEstimate),
}

impl ComparableRecord {
    pub fn category(&self) -> SourceCategory {
        match self {
            Self::Sale(_) => SourceCategory::Sales,
            Self::Listing(_) => SourceCategory::Listings,
            Self::Estimate(_) => SourceCategory::Estimates,
        }
    }

    pub fn id(&self) -> &ComparableId {
        match self {
            Self::Sale(record) => &record.id,
            Self::Listing(record) => &record.id,
            Self::Estimate(record) => &record.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: ComparableId) {
        match self {
            Self::Sale(record) => record.id = id,
            Self::Listing(record) => record.id = id,
            Self::Estimate(record) => record.id = id,
        }
    }

    /// Price pooled for dispersion: not scaled by area.
    pub fn raw_price(&self) -> f64 {
        match self {
            Self::Sale(record) => record.price,
            Self::Listing(record) => record.price,
            Self::Estimate(record) => record.midpoint(),
        }
    }
}

/// The three comparable lists handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparableSet {
    pub sales: Vec<SaleRecord>,
    pub listings: Vec<ListingRecord>,
    pub estimates: Vec<AgencyEstimate>,
}

impl ComparableSet {
    pub fn len(&self) -> usize {
        self.sales.len() + self.listings.len() + self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, category: SourceCategory) -> usize {
        match category {
            SourceCategory::Sales => self.sales.len(),
            SourceCategory::Listings => self.listings.len(),
            SourceCategory::Estimates => self.estimates.len(),
        }
    }

    pub fn push(&mut self, record: ComparableRecord) {
        match record {
            ComparableRecord::Sale(record) => self.sales.push(record),
            ComparableRecord::Listing(record) => self.listings.push(record),
            ComparableRecord::Estimate(record) => self.estimates.push(record),
        }
    }

    pub fn get(&self, id: &ComparableId) -> Option<ComparableRecord> {
        self.sales
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .map(ComparableRecord::Sale)
            .or_else(|| {
                self.listings
                    .iter()
                    .find(|record| &record.id == id)
                    .cloned()
                    .map(ComparableRecord::Listing)
            })
            .or_else(|| {
                self.estimates
                    .iter()
                    .find(|record| &record.id == id)
                    .cloned()
                    .map(ComparableRecord::Estimate)
            })
    }

    /// Replaces the record carrying `record.id()` in place. Returns false when
    /// no record of the same category has that id.
    pub(crate) fn replace(&mut self, record: ComparableRecord) -> bool {
        match record {
            ComparableRecord::Sale(record) => replace_by_id(&mut self.sales, record, |r| &r.id),
            ComparableRecord::Listing(record) => {
                replace_by_id(&mut self.listings, record, |r| &r.id)
            }
            ComparableRecord::Estimate(record) => {
                replace_by_id(&mut self.estimates, record, |r| &r.id)
            }
        }
    }

    pub fn remove(&mut self, id: &ComparableId) -> Option<ComparableRecord> {
        if let Some(index) = self.sales.iter().position(|record| &record.id == id) {
            return Some(ComparableRecord::Sale(self.sales.remove(index)));
        }
        if let Some(index) = self.listings.iter().position(|record| &record.id == id) {
            return Some(ComparableRecord::Listing(self.listings.remove(index)));
        }
        if let Some(index) = self.estimates.iter().position(|record| &record.id == id) {
            return Some(ComparableRecord::Estimate(self.estimates.remove(index)));
        }
        None
    }

    /// Every raw price in sale, listing, estimate order.
    pub fn raw_prices(&self) -> Vec<f64> {
        self.sales
            .iter()
            .map(|record| record.price)
            .chain(self.listings.iter().map(|record| record.price))
            .chain(self.estimates.iter().map(AgencyEstimate::midpoint))
            .collect()
    }
}

fn replace_by_id<T>(records: &mut [T], record: T, id_of: impl Fn(&T) -> &ComparableId) -> bool {
    match records.iter_mut().find(|existing| id_of(existing) == id_of(&record)) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Relative trust placed in each source category. Normalised by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceWeights {
    pub sales: f64,
    pub listings: f64,
    pub estimates: f64,
}

impl SourceWeights {
    pub const fn new(sales: f64, listings: f64, estimates: f64) -> Self {
        Self {
            sales,
            listings,
            estimates,
        }
    }

    pub fn get(&self, category: SourceCategory) -> f64 {
        match category {
            SourceCategory::Sales => self.sales,
            SourceCategory::Listings => self.listings,
            SourceCategory::Estimates => self.estimates,
        }
    }

    pub fn total(&self) -> f64 {
        self.sales + self.listings + self.estimates
    }
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self::new(50.0, 30.0, 20.0)
    }
}
