//! Wires the pricing domain to the application's database connection.

use axum::Router;
use domain_pricing::{PgPricingRepository, PricingService, handlers};

use crate::state::AppState;

/// Build the pricing router backed by the PostgreSQL repository.
pub fn router(state: &AppState) -> Router {
    let repo = PgPricingRepository::new(state.db.clone());
    let service = PricingService::new(repo);
    handlers::router(service)
}
