use serde::{self, Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    f64::{Force, Length},
    force::{kilonewton, kip, meganewton, newton, pound_force},
    length::{centimeter, foot, inch, meter, millimeter, yard},
};

/// A raw value tagged with the unit string it was written in
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type ForceValue = WithUnit<Force>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }

    /// Unit name with case folded, so `"FT"`, `"Ft"` and `"ft"` agree
    fn normalized_unit(&self) -> String {
        self.unit.trim().to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown force unit: {0}")]
    UnknownForceUnit(String),
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        let length = match self.normalized_unit().as_str() {
            "m" | "meter" | "metre" | "meters" | "metres" => Length::new::<meter>(self.value),
            "cm" | "centimeter" | "centimetre" | "centimeters" | "centimetres" => {
                Length::new::<centimeter>(self.value)
            }
            "mm" | "millimeter" | "millimetre" | "millimeters" | "millimetres" => {
                Length::new::<millimeter>(self.value)
            }
            "ft" | "foot" | "feet" => Length::new::<foot>(self.value),
            "in" | "inch" | "inches" => Length::new::<inch>(self.value),
            "yd" | "yard" | "yards" => Length::new::<yard>(self.value),
            _ => return Err(UnitError::UnknownLengthUnit(self.unit.clone())),
        };
        Ok(length)
    }
}

impl WithUnit<Force> {
    pub fn to_force(&self) -> Result<Force, UnitError> {
        let force = match self.normalized_unit().as_str() {
            "n" | "newton" | "newtons" => Force::new::<newton>(self.value),
            "kn" | "kilonewton" | "kilonewtons" => Force::new::<kilonewton>(self.value),
            "mn" | "meganewton" | "meganewtons" => Force::new::<meganewton>(self.value),
            "lbf" | "pound-force" | "pounds-force" => Force::new::<pound_force>(self.value),
            "kip" | "kips" => Force::new::<kip>(self.value),
            _ => return Err(UnitError::UnknownForceUnit(self.unit.clone())),
        };
        Ok(force)
    }
}
