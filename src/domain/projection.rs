use super::vehicle::{Fueling, Vehicle};

/// Label set shared by all vehicle-level gauges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleLabels {
    pub id: String,
    pub make: String,
    pub model: String,
}

impl VehicleLabels {
    pub const NAMES: [&'static str; 3] = ["id", "make", "model"];

    pub fn values(&self) -> [&str; 3] {
        [self.id.as_str(), self.make.as_str(), self.model.as_str()]
    }
}

impl From<&Vehicle> for VehicleLabels {
    fn from(vehicle: &Vehicle) -> Self {
        VehicleLabels {
            id: vehicle.id.to_string(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
        }
    }
}

/// Label set shared by all fueling-level gauges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuelingLabels {
    pub vehicle: VehicleLabels,
    pub date: String,
    pub fuelsortid: String,
}

impl FuelingLabels {
    pub const NAMES: [&'static str; 5] = ["id", "make", "model", "date", "fuelsortid"];

    pub fn values(&self) -> [&str; 5] {
        [
            self.vehicle.id.as_str(),
            self.vehicle.make.as_str(),
            self.vehicle.model.as_str(),
            self.date.as_str(),
            self.fuelsortid.as_str(),
        ]
    }
}

/// Gauge values published for one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSample {
    pub labels: VehicleLabels,
    pub consumption: f64,
    pub trip_sum: f64,
    pub fuel_sum: f64,
}

impl From<&Vehicle> for VehicleSample {
    fn from(vehicle: &Vehicle) -> Self {
        VehicleSample {
            labels: VehicleLabels::from(vehicle),
            consumption: vehicle.consumption.value(),
            trip_sum: vehicle.tripsum.value(),
            fuel_sum: vehicle.quantitysum.value(),
        }
    }
}

/// Gauge values published for one fueling of a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelingSample {
    pub labels: FuelingLabels,
    pub odometer: f64,
    pub trip: f64,
    pub quantity: f64,
    pub cost: f64,
    pub consumption: f64,
}

impl FuelingSample {
    pub fn new(vehicle: &VehicleLabels, fueling: &Fueling) -> Self {
        // ---
        FuelingSample {
            labels: FuelingLabels {
                vehicle: vehicle.clone(),
                date: fueling.date.clone(),
                fuelsortid: fueling.fuelsortid.to_string(),
            },
            odometer: fueling.odometer.value(),
            trip: fueling.trip.value(),
            quantity: fueling.quantity.value(),
            cost: fueling.cost.value(),
            consumption: fueling.consumption.value(),
        }
    }
}
