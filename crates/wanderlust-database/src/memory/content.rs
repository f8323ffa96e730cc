use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use wanderlust_core::result::AppResult;
use wanderlust_entity::listing::{CreateListing, CreateReview, Listing, Review, UpdateListing};

use super::MemoryDatabase;
use crate::repositories::{ListingRepository, ReviewRepository};

#[async_trait]
impl ListingRepository for MemoryDatabase {
    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let mut listings: Vec<Listing> = self.listings.iter().map(|l| l.clone()).collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        Ok(self.listings.get(&id).map(|l| l.clone()))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>> {
        let mut listings: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .map(|l| l.clone())
            .collect();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    async fn create(&self, input: CreateListing) -> AppResult<Listing> {
        let listing = Listing {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            price: input.price,
            location: input.location,
            country: input.country,
            owner_id: input.owner_id,
            owner_username: self.username_of(input.owner_id),
            created_at: Utc::now(),
        };
        self.listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn update(&self, id: Uuid, input: UpdateListing) -> AppResult<Option<Listing>> {
        let Some(mut listing) = self.listings.get_mut(&id) else {
            return Ok(None);
        };
        listing.title = input.title;
        listing.description = input.description;
        listing.image_url = input.image_url;
        listing.price = input.price;
        listing.location = input.location;
        listing.country = input.country;
        Ok(Some(listing.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let removed = self.listings.remove(&id).is_some();
        if removed {
            self.reviews.retain(|_, r| r.listing_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ReviewRepository for MemoryDatabase {
    async fn find_by_listing(&self, listing_id: Uuid) -> AppResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.listing_id == listing_id)
            .map(|r| r.clone())
            .collect();
        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(reviews)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        Ok(self.reviews.get(&id).map(|r| r.clone()))
    }

    async fn create(&self, input: CreateReview) -> AppResult<Review> {
        let review = Review {
            id: Uuid::new_v4(),
            listing_id: input.listing_id,
            author_id: input.author_id,
            author_username: self.username_of(input.author_id),
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        };
        self.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.reviews.remove(&id).is_some())
    }
}
