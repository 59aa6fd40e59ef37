//! Restaurant entity <-> model mappers

use std::collections::HashMap;

use review_core::entities::{Award, Restaurant, RestaurantSummary};
use review_core::value_objects::RestaurantId;

use crate::models::{AwardModel, HighlightModel, RestaurantModel, RestaurantSummaryModel};

/// Awards and highlights of a batch of restaurants, grouped by restaurant id
#[derive(Debug, Default)]
pub struct RestaurantDetails {
    awards: HashMap<i64, Vec<AwardModel>>,
    highlights: HashMap<i64, Vec<HighlightModel>>,
}

impl RestaurantDetails {
    pub fn new(awards: Vec<AwardModel>, highlights: Vec<HighlightModel>) -> Self {
        let mut details = Self::default();
        for award in awards {
            details.awards.entry(award.restaurant_id).or_default().push(award);
        }
        for highlight in highlights {
            details
                .highlights
                .entry(highlight.restaurant_id)
                .or_default()
                .push(highlight);
        }
        details
    }

    /// Build the entity for `model`, consuming its awards and highlights
    pub fn attach(&mut self, model: RestaurantModel) -> Restaurant {
        let awards = self.awards.remove(&model.id).unwrap_or_default();
        let highlights = self.highlights.remove(&model.id).unwrap_or_default();
        restaurant_from_parts(model, awards, highlights)
    }
}

/// Assemble a Restaurant from its row plus child rows (sorted by position)
pub fn restaurant_from_parts(
    model: RestaurantModel,
    mut awards: Vec<AwardModel>,
    mut highlights: Vec<HighlightModel>,
) -> Restaurant {
    awards.sort_by_key(|a| a.position);
    highlights.sort_by_key(|h| h.position);

    Restaurant {
        id: RestaurantId::new(model.id),
        name: model.name,
        description: model.description,
        cuisine: model.cuisine,
        address: model.address,
        city: model.city,
        price_range: model.price_range,
        website: model.website,
        phone: model.phone,
        image_url: model.image_url,
        awards: awards
            .into_iter()
            .map(|a| Award {
                name: a.name,
                year: a.year,
            })
            .collect(),
        highlights: highlights.into_iter().map(|h| h.highlight).collect(),
        featured: model.featured,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl From<RestaurantSummaryModel> for RestaurantSummary {
    fn from(model: RestaurantSummaryModel) -> Self {
        RestaurantSummary {
            id: RestaurantId::new(model.id),
            name: model.name,
            cuisine: model.cuisine,
            city: model.city,
            featured: model.featured,
            average_rating: model.average_rating,
            review_count: model.review_count,
        }
    }
}
