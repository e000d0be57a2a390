use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::storage::MoveEstimate;

use super::cost::Company;

/// Home sizes the cost tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSize {
    Studio,
    OneBedroom,
    TwoBedroom,
    ThreeBedroom,
}

impl HomeSize {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "studio" => Some(HomeSize::Studio),
            "1bedroom" => Some(HomeSize::OneBedroom),
            "2bedroom" => Some(HomeSize::TwoBedroom),
            "3bedroom" => Some(HomeSize::ThreeBedroom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeSize::Studio => "studio",
            HomeSize::OneBedroom => "1bedroom",
            HomeSize::TwoBedroom => "2bedroom",
            HomeSize::ThreeBedroom => "3bedroom",
        }
    }

    pub const ALL: [HomeSize; 4] = [
        HomeSize::Studio,
        HomeSize::OneBedroom,
        HomeSize::TwoBedroom,
        HomeSize::ThreeBedroom,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalItems {
    None,
    Piano,
    Artwork,
    Gym,
    Multiple,
}

impl AdditionalItems {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(AdditionalItems::None),
            "piano" => Some(AdditionalItems::Piano),
            "artwork" => Some(AdditionalItems::Artwork),
            "gym" => Some(AdditionalItems::Gym),
            "multiple" => Some(AdditionalItems::Multiple),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdditionalItems::None => "none",
            AdditionalItems::Piano => "piano",
            AdditionalItems::Artwork => "artwork",
            AdditionalItems::Gym => "gym",
            AdditionalItems::Multiple => "multiple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flexibility {
    Exact,
    OneToTwoDays,
    OneWeek,
    Flexible,
}

impl Flexibility {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Flexibility::Exact),
            "1-2days" => Some(Flexibility::OneToTwoDays),
            "1week" => Some(Flexibility::OneWeek),
            "flexible" => Some(Flexibility::Flexible),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flexibility::Exact => "exact",
            Flexibility::OneToTwoDays => "1-2days",
            Flexibility::OneWeek => "1week",
            Flexibility::Flexible => "flexible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Service {
    Packing,
    Storage,
    Cleaning,
}

impl Service {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "packing" => Some(Service::Packing),
            "storage" => Some(Service::Storage),
            "cleaning" => Some(Service::Cleaning),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Packing => "packing",
            Service::Storage => "storage",
            Service::Cleaning => "cleaning",
        }
    }
}

/// Raw calculation request as it arrives on the wire. Enum fields come in as
/// strings and are validated into [`CalculationInput`] so failures surface as
/// field-level messages rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct MoveCalculationRequest {
    pub origin: String,
    pub destination: String,
    pub home_size: String,
    #[serde(default = "default_additional_items")]
    pub additional_items: String,
    pub move_date: String,
    #[serde(default = "default_flexibility")]
    pub flexibility: String,
    #[serde(default)]
    pub services: Vec<String>,
}

fn default_additional_items() -> String {
    "none".into()
}

fn default_flexibility() -> String {
    "exact".into()
}

/// Validated calculation request.
#[derive(Debug, Clone)]
pub struct CalculationInput {
    pub origin: String,
    pub destination: String,
    pub home_size: HomeSize,
    pub additional_items: AdditionalItems,
    pub move_date: String,
    pub flexibility: Flexibility,
    pub services: Vec<Service>,
}

impl MoveCalculationRequest {
    pub fn validate(self) -> Result<CalculationInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let origin = self.origin.trim().to_string();
        if origin.len() < 5 {
            errors.push(FieldError::new("origin", "must be at least 5 characters"));
        }
        let destination = self.destination.trim().to_string();
        if destination.len() < 5 {
            errors.push(FieldError::new("destination", "must be at least 5 characters"));
        }

        let home_size = HomeSize::parse(&self.home_size);
        if home_size.is_none() {
            errors.push(FieldError::new(
                "home_size",
                "must be one of studio, 1bedroom, 2bedroom, 3bedroom",
            ));
        }

        let additional_items = AdditionalItems::parse(&self.additional_items);
        if additional_items.is_none() {
            errors.push(FieldError::new(
                "additional_items",
                "must be one of none, piano, artwork, gym, multiple",
            ));
        }

        if self.move_date.trim().is_empty() {
            errors.push(FieldError::new("move_date", "is required"));
        }

        let flexibility = Flexibility::parse(&self.flexibility);
        if flexibility.is_none() {
            errors.push(FieldError::new(
                "flexibility",
                "must be one of exact, 1-2days, 1week, flexible",
            ));
        }

        let mut services = Vec::new();
        for raw in &self.services {
            match Service::parse(raw) {
                Some(s) => services.push(s),
                None => errors.push(FieldError::new(
                    "services",
                    format!("unknown service: {raw}"),
                )),
            }
        }
        // set semantics: duplicates collapse, order is irrelevant
        services.sort();
        services.dedup();

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CalculationInput {
            origin,
            destination,
            home_size: home_size.unwrap(),
            additional_items: additional_items.unwrap(),
            move_date: self.move_date.trim().to_string(),
            flexibility: flexibility.unwrap(),
            services,
        })
    }
}

/// Explicit save of a previously computed estimate.
#[derive(Debug, Deserialize)]
pub struct SaveEstimateRequest {
    pub origin: String,
    pub destination: String,
    pub distance: i64,
    pub home_size: String,
    #[serde(default = "default_additional_items")]
    pub additional_items: String,
    pub move_date: String,
    #[serde(default = "default_flexibility")]
    pub flexibility: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub cost_diy: i64,
    pub cost_hybrid: i64,
    pub cost_full_service: i64,
}

impl SaveEstimateRequest {
    pub fn validate(self) -> Result<Self, Vec<FieldError>> {
        let calc = MoveCalculationRequest {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            home_size: self.home_size.clone(),
            additional_items: self.additional_items.clone(),
            move_date: self.move_date.clone(),
            flexibility: self.flexibility.clone(),
            services: self.services.clone(),
        };
        let mut errors = match calc.validate() {
            Ok(_) => Vec::new(),
            Err(e) => e,
        };

        if self.distance < 0 {
            errors.push(FieldError::new("distance", "must be non-negative"));
        }
        for (field, value) in [
            ("cost_diy", self.cost_diy),
            ("cost_hybrid", self.cost_hybrid),
            ("cost_full_service", self.cost_full_service),
        ] {
            if value < 0 {
                errors.push(FieldError::new(field, "must be non-negative"));
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TierCosts {
    pub diy: i64,
    pub hybrid: i64,
    pub full_service: i64,
}

#[derive(Debug, Serialize)]
pub struct CostBreakdown {
    pub transportation: i64,
    pub labor: i64,
    pub materials: i64,
    pub other: i64,
}

#[derive(Debug, Serialize)]
pub struct MoveCalculationResponse {
    pub estimate_id: i64,
    pub distance: i64,
    pub costs: TierCosts,
    pub breakdown: CostBreakdown,
    pub companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
pub struct EstimateList {
    pub estimates: Vec<MoveEstimate>,
}
