//! ECS components for entities.
//!
//! Submodules overview:
//! - [`blower`] – cone force field, particle jet directive and the leaf blower
//! - [`interaction`] – agent/target snapshots shared by blower and sweeper
//! - [`leaf`] – a leaf on the playfield
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`player`] – player marker and movement tuning
//! - [`rigidbody`] – kinematic body storing velocity and drag
//! - [`rotation`] – facing angle in radians
//! - [`scale`] – 2D scale factor
//! - [`scenescript`] – timeline-driven scene script and its command queue
//! - [`sweeper`] – proximity collector and the road sweeper
//! - [`timeline`] – the phase timeline engine
//! - [`timer`] – countdown timer that emits events when finished

pub mod blower;
pub mod interaction;
pub mod leaf;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
pub mod rotation;
pub mod scale;
pub mod scenescript;
pub mod sweeper;
pub mod timeline;
pub mod timer;
