//! Flight itinerary search server.
//!
//! Loads a static dataset of airports and scheduled flights and answers:
//! "which direct, one-stop and two-stop itineraries leave this airport on
//! this date for that one?"

pub mod config;
pub mod dataset;
pub mod domain;
pub mod index;
pub mod planner;
pub mod web;
