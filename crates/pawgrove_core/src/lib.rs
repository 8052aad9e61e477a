//! # Pawgrove Core
//!
//! The simulation engine for Pawgrove - an agent-based pet ecosystem on
//! a toroidal grid.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Needs-driven animal behavior (dogs and cats)
//! - Food dropped by wandering feeders and consumed before it spoils
//! - Harvesters dispatched to thin overgrown populations
//! - Random-order activation with a typed per-tick event ledger
//!
//! ## Architecture
//!
//! The simulation follows a model-driven design with:
//! - **Multi-occupancy grid**: toroidal wraparound, Moore neighborhoods
//! - **Shuffled activation**: each tick draws a fresh agent order
//! - **Context handle**: agents touch the world only through [`world::TickCtx`]
//! - **Deterministic runs**: seeded RNG for reproducible results
//!
//! ## Example
//!
//! ```
//! use pawgrove_core::config::SimConfig;
//! use pawgrove_core::world::World;
//!
//! let mut config = SimConfig::default();
//! config.world.seed = Some(7);
//! let mut world = World::new(config).expect("default config is valid");
//! let report = world.tick();
//! assert_eq!(report.tick, 1);
//! ```

/// Agent identity, kinds, and the roster-owned state enum
pub mod agent;
/// Dog and cat behavior (need ladders, feeding, mating)
pub mod animal;
/// Configuration sections with validation and fingerprinting
pub mod config;
/// Population feedback control (harvester dispatch)
pub mod controller;
/// Typed per-tick event ledger
pub mod events;
/// Wandering feeders that drop food markers
pub mod feeder;
/// Food markers with a shelf life
pub mod food;
/// Toroidal multi-occupancy grid and Chebyshev geometry
pub mod grid;
/// Harvesters that pursue and collect one species
pub mod harvester;
/// Roster and shuffled activation order
pub mod scheduler;
/// Read-only agent views for observers
pub mod snapshot;
/// Species definitions and tunable rule sets
pub mod species;
/// World state and tick orchestration
pub mod world;

pub use agent::{AgentKind, AgentState, EntityId};
pub use config::SimConfig;
pub use events::{SimEvent, TickReport};
pub use species::Species;
pub use world::{TickCtx, World};
