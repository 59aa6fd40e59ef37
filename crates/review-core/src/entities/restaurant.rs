//! Restaurant entity and its ranking summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::RestaurantId;

/// An award listed on a restaurant page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    pub year: Option<i32>,
}

/// Restaurant entity
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price_range: Option<i16>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub awards: Vec<Award>,
    pub highlights: Vec<String>,
    pub featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new restaurant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub cuisine: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub price_range: Option<i16>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub awards: Vec<Award>,
    pub highlights: Vec<String>,
    pub featured: bool,
}

/// Partial update of a restaurant
///
/// `None` leaves a field unchanged. For the optional columns `Some(None)`
/// clears the value. `awards` and `highlights` replace the whole list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub cuisine: Option<String>,
    pub address: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub price_range: Option<Option<i16>>,
    pub website: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub awards: Option<Vec<Award>>,
    pub highlights: Option<Vec<String>>,
    pub featured: Option<bool>,
}

fn check_listing(
    name: &str,
    cuisine: &str,
    price_range: Option<i16>,
    awards: &[Award],
) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::ValidationError("name is required".to_string()));
    }
    if cuisine.trim().is_empty() {
        return Err(DomainError::ValidationError("cuisine is required".to_string()));
    }
    if let Some(price) = price_range {
        if !(1..=4).contains(&price) {
            return Err(DomainError::ValidationError(
                "price_range must be between 1 and 4".to_string(),
            ));
        }
    }
    if awards.iter().any(|a| a.name.trim().is_empty()) {
        return Err(DomainError::ValidationError(
            "award name is required".to_string(),
        ));
    }
    Ok(())
}

impl NewRestaurant {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_listing(&self.name, &self.cuisine, self.price_range, &self.awards)
    }
}

impl Restaurant {
    /// Build a freshly stored restaurant from its input
    pub fn from_new(id: RestaurantId, new: NewRestaurant, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            cuisine: new.cuisine,
            address: new.address,
            city: new.city,
            price_range: new.price_range,
            website: new.website,
            phone: new.phone,
            image_url: new.image_url,
            awards: new.awards,
            highlights: new.highlights,
            featured: new.featured,
            is_active: true,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply an edit; on error the restaurant is left untouched
    pub fn apply_patch(
        &mut self,
        patch: RestaurantPatch,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut updated = self.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(cuisine) = patch.cuisine {
            updated.cuisine = cuisine;
        }
        if let Some(address) = patch.address {
            updated.address = address;
        }
        if let Some(city) = patch.city {
            updated.city = city;
        }
        if let Some(price_range) = patch.price_range {
            updated.price_range = price_range;
        }
        if let Some(website) = patch.website {
            updated.website = website;
        }
        if let Some(phone) = patch.phone {
            updated.phone = phone;
        }
        if let Some(image_url) = patch.image_url {
            updated.image_url = image_url;
        }
        if let Some(awards) = patch.awards {
            updated.awards = awards;
        }
        if let Some(highlights) = patch.highlights {
            updated.highlights = highlights;
        }
        if let Some(featured) = patch.featured {
            updated.featured = featured;
        }

        check_listing(
            &updated.name,
            &updated.cuisine,
            updated.price_range,
            &updated.awards,
        )?;

        updated.updated_at = now;
        *self = updated;
        Ok(())
    }
}

/// Restaurant with its approved-review aggregate, used for ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantSummary {
    pub id: RestaurantId,
    pub name: String,
    pub cuisine: String,
    pub city: Option<String>,
    pub featured: bool,
    pub average_rating: f64,
    pub review_count: i64,
}
