//! Per-category ratings
//!
//! A review scores a restaurant on five categories, each a real number in
//! `[MIN_RATING, MAX_RATING]`. The overall rating is their arithmetic mean and is
//! always derived from these inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Lowest accepted category rating
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted category rating
pub const MAX_RATING: f64 = 5.0;

/// Rating categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingCategory {
    Food,
    Taste,
    Ambiance,
    Creativity,
    Uniqueness,
}

impl RatingCategory {
    /// All categories, in display order
    pub const ALL: [RatingCategory; 5] = [
        Self::Food,
        Self::Taste,
        Self::Ambiance,
        Self::Creativity,
        Self::Uniqueness,
    ];

    /// Field name used in storage and JSON
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Taste => "taste",
            Self::Ambiance => "ambiance",
            Self::Creativity => "creativity",
            Self::Uniqueness => "uniqueness",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete set of five category ratings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryRatings {
    pub food: f64,
    pub taste: f64,
    pub ambiance: f64,
    pub creativity: f64,
    pub uniqueness: f64,
}

impl CategoryRatings {
    pub const fn new(food: f64, taste: f64, ambiance: f64, creativity: f64, uniqueness: f64) -> Self {
        Self {
            food,
            taste,
            ambiance,
            creativity,
            uniqueness,
        }
    }

    /// Same rating for every category
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value, value)
    }

    /// Get the rating of one category
    pub const fn get(&self, category: RatingCategory) -> f64 {
        match category {
            RatingCategory::Food => self.food,
            RatingCategory::Taste => self.taste,
            RatingCategory::Ambiance => self.ambiance,
            RatingCategory::Creativity => self.creativity,
            RatingCategory::Uniqueness => self.uniqueness,
        }
    }

    fn slot(&mut self, category: RatingCategory) -> &mut f64 {
        match category {
            RatingCategory::Food => &mut self.food,
            RatingCategory::Taste => &mut self.taste,
            RatingCategory::Ambiance => &mut self.ambiance,
            RatingCategory::Creativity => &mut self.creativity,
            RatingCategory::Uniqueness => &mut self.uniqueness,
        }
    }

    /// Iterate `(category, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (RatingCategory, f64)> + '_ {
        RatingCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Check every category is finite and within range
    pub fn validate(&self) -> Result<(), DomainError> {
        for (category, value) in self.iter() {
            if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(DomainError::InvalidRating {
                    category: category.as_str(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Arithmetic mean of the five categories, without validation
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum::<f64>() / RatingCategory::ALL.len() as f64
    }

    /// Element-wise sum, used when averaging many rating sets
    pub(crate) fn accumulate(&mut self, other: &CategoryRatings) {
        for category in RatingCategory::ALL {
            *self.slot(category) += other.get(category);
        }
    }

    /// Divide every category by `divisor`
    pub(crate) fn scaled_down(mut self, divisor: f64) -> Self {
        for category in RatingCategory::ALL {
            *self.slot(category) /= divisor;
        }
        self
    }
}

/// A possibly incomplete set of category ratings
///
/// Used as raw input on create (where every category is required) and as a
/// partial update on edit (where absent categories keep their value).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingsPatch {
    pub food: Option<f64>,
    pub taste: Option<f64>,
    pub ambiance: Option<f64>,
    pub creativity: Option<f64>,
    pub uniqueness: Option<f64>,
}

impl RatingsPatch {
    fn get(&self, category: RatingCategory) -> Option<f64> {
        match category {
            RatingCategory::Food => self.food,
            RatingCategory::Taste => self.taste,
            RatingCategory::Ambiance => self.ambiance,
            RatingCategory::Creativity => self.creativity,
            RatingCategory::Uniqueness => self.uniqueness,
        }
    }

    /// Whether no category is present
    pub fn is_empty(&self) -> bool {
        RatingCategory::ALL.iter().all(|c| self.get(*c).is_none())
    }

    /// Require all five categories and validate their range
    pub fn into_complete(self) -> Result<CategoryRatings, DomainError> {
        let mut ratings = CategoryRatings::default();
        for category in RatingCategory::ALL {
            let value = self
                .get(category)
                .ok_or(DomainError::MissingRating(category.as_str()))?;
            *ratings.slot(category) = value;
        }
        ratings.validate()?;
        Ok(ratings)
    }

    /// Overlay present categories onto `base` and validate the result
    pub fn apply_to(&self, base: &CategoryRatings) -> Result<CategoryRatings, DomainError> {
        let mut ratings = *base;
        for category in RatingCategory::ALL {
            if let Some(value) = self.get(category) {
                *ratings.slot(category) = value;
            }
        }
        ratings.validate()?;
        Ok(ratings)
    }
}

impl From<CategoryRatings> for RatingsPatch {
    fn from(r: CategoryRatings) -> Self {
        Self {
            food: Some(r.food),
            taste: Some(r.taste),
            ambiance: Some(r.ambiance),
            creativity: Some(r.creativity),
            uniqueness: Some(r.uniqueness),
        }
    }
}
